/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::Permission;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Credentials used for every call made through a [`crate::rest::Client`].
///
/// Built once and then only read. Getting the auth/access tokens (the OAuth exchange) is left
/// up to the consumer of this library.
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct Creds {
    api_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    shared_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    oauth_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    oauth_token_secret: Option<String>,

    #[serde(default)]
    permission: Permission,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
}

impl Creds {
    /// Creates credentials from the API key/secret and an optional OAuth access token pair.
    ///
    /// The API key is the only required field for reading public data.
    pub fn from_tokens(
        api_key: &str,
        shared_secret: Option<&str>,
        access_token: Option<&str>,
        token_secret: Option<&str>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            shared_secret: shared_secret.map(Into::into),
            oauth_token: access_token.map(Into::into),
            oauth_token_secret: token_secret.map(Into::into),
            ..Default::default()
        }
    }

    /// Attaches a legacy (non OAuth) authentication token
    pub fn with_auth_token(mut self, auth_token: &str) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = permission;
        self
    }

    /// Records who the tokens belong to
    pub fn with_user(mut self, user_id: &str, user_name: Option<&str>, full_name: Option<&str>) -> Self {
        self.user_id = Some(user_id.into());
        self.user_name = user_name.map(Into::into);
        self.full_name = full_name.map(Into::into);
        self
    }

    /// Reads credentials from `FLICKR_*` environment variables.
    ///
    /// Only `FLICKR_API_KEY` is required.
    pub fn from_env() -> Result<Self, FlickrError> {
        let api_key = std::env::var("FLICKR_API_KEY")
            .map_err(|_| FlickrError::MissingArgument("FLICKR_API_KEY".into()))?;
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let permission = match var("FLICKR_PERMISSION") {
            Some(p) => Permission::from_str(&p).map_err(|e| {
                FlickrError::InvalidArgument("FLICKR_PERMISSION".into(), e.to_string())
            })?,
            None => Permission::None,
        };

        Ok(Self {
            api_key,
            shared_secret: var("FLICKR_SHARED_SECRET"),
            auth_token: var("FLICKR_AUTH_TOKEN"),
            oauth_token: var("FLICKR_OAUTH_TOKEN"),
            oauth_token_secret: var("FLICKR_OAUTH_TOKEN_SECRET"),
            permission,
            ..Default::default()
        })
    }

    /// Loads credentials from a JSON token cache file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlickrError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes these credentials to a JSON token cache file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FlickrError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn shared_secret(&self) -> Option<&str> {
        self.shared_secret.as_deref()
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// The OAuth access token and its secret, when both are present
    pub fn oauth_token_pair(&self) -> Option<(&str, &str)> {
        self.oauth_token
            .as_deref()
            .zip(self.oauth_token_secret.as_deref())
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "xxx");
        f.debug_struct("Creds")
            .field("api_key", &"xxx")
            .field("shared_secret", &redact(&self.shared_secret))
            .field("auth_token", &redact(&self.auth_token))
            .field("oauth_token", &redact(&self.oauth_token))
            .field("oauth_token_secret", &redact(&self.oauth_token_secret))
            .field("permission", &self.permission)
            .field("user_id", &self.user_id)
            .finish()
    }
}
