/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Request signing.
//!
//! Two schemes are supported. The legacy `api_sig` is an MD5 digest of the shared secret
//! followed by every parameter name and value, sorted by name. OAuth 1.0a requests carry an
//! HMAC-SHA1 `oauth_signature` instead.

use crate::rest::errors::FlickrError;
use crate::rest::{HttpVerb, WireParams};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha1::Sha1;

pub const API_SIG: &str = "api_sig";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";

type HmacSha1 = Hmac<Sha1>;

/// Computes the `api_sig` for a set of parameters.
///
/// Any `api_sig` already in `params` is ignored. Names are compared as raw bytes.
pub fn sign(secret: &str, params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> =
        params.iter().filter(|(name, _)| name != API_SIG).collect();
    sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let mut input = String::from(secret);
    for (name, value) in sorted {
        input.push_str(name);
        input.push_str(value);
    }
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// Signs `params` in place with `api_sig`, replacing any previous signature
pub fn append_api_sig(secret: &str, params: &mut WireParams) {
    let sig = sign(secret, params);
    params.retain(|(name, _)| name != API_SIG);
    params.push((API_SIG.to_string(), sig));
}

/// Per-request OAuth values that are not derived from the credentials
#[derive(Debug, Clone)]
pub struct OAuthNonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl OAuthNonce {
    pub fn generate() -> Self {
        let nonce: u64 = rand::rng().random();
        Self {
            nonce: format!("{nonce:016x}"),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

// RFC 3986 percent encoding, everything but unreserved characters
fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Builds the OAuth signature base string
pub fn oauth_base_string(verb: HttpVerb, endpoint: &str, params: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .filter(|(name, _)| name != OAUTH_SIGNATURE)
        .map(|(name, value)| (encode(name), encode(value)))
        .collect();
    pairs.sort();
    let normalized = pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        verb.as_str(),
        encode(endpoint),
        encode(&normalized)
    )
}

/// Computes the HMAC-SHA1 `oauth_signature` for a request
pub fn oauth_signature(
    verb: HttpVerb,
    endpoint: &str,
    params: &[(String, String)],
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, FlickrError> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let base = oauth_base_string(verb, endpoint, params);
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| FlickrError::Signing(e.to_string()))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Adds the `oauth_*` protocol parameters and the resulting signature to `params`
pub fn append_oauth_signature(
    verb: HttpVerb,
    endpoint: &str,
    params: &mut WireParams,
    consumer: (&str, &str),
    token: (&str, &str),
    nonce: &OAuthNonce,
) -> Result<(), FlickrError> {
    let (consumer_key, consumer_secret) = consumer;
    let (access_token, token_secret) = token;
    params.retain(|(name, _)| !name.starts_with("oauth_"));
    params.extend(
        [
            ("oauth_consumer_key", consumer_key.to_string()),
            ("oauth_nonce", nonce.nonce.clone()),
            ("oauth_signature_method", "HMAC-SHA1".to_string()),
            ("oauth_timestamp", nonce.timestamp.to_string()),
            ("oauth_token", access_token.to_string()),
            ("oauth_version", "1.0".to_string()),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value)),
    );
    let signature = oauth_signature(verb, endpoint, params, consumer_secret, token_secret)?;
    params.push((OAUTH_SIGNATURE.to_string(), signature));
    Ok(())
}
