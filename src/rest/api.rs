/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::params::require;
use crate::rest::signing::{OAuthNonce, append_api_sig, append_oauth_signature};
use crate::rest::{
    Creds, Params, PendingCall, Permission, Token, Transport, WireRequest, WireResponse,
    XmlElement, check_permission,
};
use num_enum::TryFromPrimitive;
use std::marker::PhantomData;
use std::sync::Arc;
use url::Url;

// Root Flickr REST endpoint
pub const API_ENDPOINT: &str = "https://api.flickr.com/services/rest/";

/// HTTP method used for a call.
///
/// Read calls use GET, mutating calls use POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
        }
    }
}

/// Everything the dispatcher needs to know about one API call
#[derive(Debug, Clone)]
pub struct MethodCall {
    method: String,
    params: Params,
    verb: HttpVerb,
    signed: bool,
    authenticated: bool,
}

impl MethodCall {
    pub fn new(method: &str, params: Params, verb: HttpVerb) -> Self {
        Self {
            method: method.into(),
            params,
            verb,
            signed: false,
            authenticated: false,
        }
    }

    pub fn get(method: &str, params: Params) -> Self {
        Self::new(method, params, HttpVerb::Get)
    }

    pub fn post(method: &str, params: Params) -> Self {
        Self::new(method, params, HttpVerb::Post)
    }

    /// Sign the request when the credentials carry a shared secret
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// Include the auth token; authenticated calls are always signed
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self.signed = true;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn verb(&self) -> HttpVerb {
        self.verb
    }
}

/// Directly communicates with the API.
///
/// Builds and signs each request on the calling thread, then performs the exchange on the
/// tokio runtime and delivers the outcome through the call's [`Token`].
#[derive(Clone)]
pub struct ApiClient {
    creds: Arc<Creds>,
    endpoint: Url,
    transport: Arc<dyn Transport>,
    runtime: tokio::runtime::Handle,
}

impl ApiClient {
    pub fn new(
        creds: Arc<Creds>,
        endpoint: Url,
        transport: Arc<dyn Transport>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            creds,
            endpoint,
            transport,
            runtime,
        }
    }

    pub fn creds(&self) -> &Creds {
        &self.creds
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn check_permission(&self, required: Permission) -> Result<(), FlickrError> {
        check_permission(&self.creds, required)
    }

    /// Assembles the final, signed parameter set for `call`
    pub fn build_request(&self, call: &MethodCall) -> Result<WireRequest, FlickrError> {
        let method = require("method", &call.method)?;
        let api_key = require("api_key", self.creds.api_key())?;

        let mut params = call.params.to_wire()?;
        params.retain(|(name, _)| name != "method" && name != "api_key");
        params.push(("method".into(), method.into()));
        params.push(("api_key".into(), api_key.into()));

        if call.authenticated {
            if let Some(auth_token) = self.creds.auth_token() {
                params.retain(|(name, _)| name != "auth_token");
                params.push(("auth_token".into(), auth_token.into()));
            }
        }

        if call.signed {
            match (self.creds.shared_secret(), self.creds.oauth_token_pair()) {
                (Some(secret), Some(token)) => append_oauth_signature(
                    call.verb,
                    self.endpoint.as_str(),
                    &mut params,
                    (api_key, secret),
                    token,
                    &OAuthNonce::generate(),
                )?,
                (Some(secret), None) => append_api_sig(secret, &mut params),
                (None, _) => log::trace!("No shared secret, {method} goes out unsigned"),
            }
        }

        Ok(WireRequest {
            verb: call.verb,
            endpoint: self.endpoint.clone(),
            params,
        })
    }

    /// Dispatches `call` and returns immediately.
    ///
    /// Failures that can be determined locally are returned as `Err` and no token is
    /// issued. Everything that depends on the network arrives through the returned
    /// [`PendingCall`]; `project` turns a successful `<rsp>` root into the result.
    pub fn dispatch<T, P>(&self, call: MethodCall, project: P) -> Result<PendingCall<T>, FlickrError>
    where
        T: Send + 'static,
        P: FnOnce(&XmlElement) -> Result<T, FlickrError> + Send + 'static,
    {
        let request = self.build_request(&call)?;
        let token = Token::issue();
        let (pending, sender) = PendingCall::channel(token);
        self.spawn_exchange(token, call.method, request, project, move |_, result| {
            // The caller may have dropped the pending call; that only discards the result
            let _ = sender.send(result);
        });
        Ok(pending)
    }

    /// Continuation flavour of [`ApiClient::dispatch`].
    ///
    /// Exactly one of `on_success` or `on_failure` runs, on a runtime worker rather than
    /// the calling thread, and receives the token returned here. A call whose task never
    /// finishes (runtime shut down, projector panicked) fails with
    /// [`FlickrError::CallAbandoned`].
    pub fn dispatch_with<T, P, S, F>(
        &self,
        call: MethodCall,
        project: P,
        on_success: S,
        on_failure: F,
    ) -> Result<Token, FlickrError>
    where
        T: Send + 'static,
        P: FnOnce(&XmlElement) -> Result<T, FlickrError> + Send + 'static,
        S: FnOnce(Token, T) + Send + 'static,
        F: FnOnce(Token, FlickrError) + Send + 'static,
    {
        let request = self.build_request(&call)?;
        let token = Token::issue();
        self.spawn_exchange(token, call.method, request, project, move |token, result| {
            match result {
                Ok(value) => on_success(token, value),
                Err(err) => on_failure(token, err),
            }
        });
        Ok(token)
    }

    fn spawn_exchange<T, P, D>(
        &self,
        token: Token,
        method: String,
        request: WireRequest,
        project: P,
        deliver: D,
    ) where
        T: Send + 'static,
        P: FnOnce(&XmlElement) -> Result<T, FlickrError> + Send + 'static,
        D: FnOnce(Token, Result<T, FlickrError>) + Send + 'static,
    {
        log::debug!("Dispatching {method} as {token} via {}", request.verb.as_str());
        let transport = self.transport.clone();
        let delivery = Delivery::new(token, deliver);
        self.runtime.spawn(async move {
            let result = match transport.send(request).await {
                Ok(resp) => classify_response(&resp).and_then(|root| project(&root)),
                Err(err) => Err(err),
            };
            match &result {
                Ok(_) => log::debug!("{token} ({method}) completed"),
                Err(err) => log::debug!("{token} ({method}) failed: {err}"),
            }
            delivery.complete(result);
        });
    }
}

/// Owns a call's delivery until the outcome is handed over.
///
/// Dropped undelivered (the task was torn down by runtime shutdown or unwound by a
/// panicking projector), it delivers [`FlickrError::CallAbandoned`] instead.
struct Delivery<T, D>
where
    D: FnOnce(Token, Result<T, FlickrError>),
{
    token: Token,
    deliver: Option<D>,
    _result: PhantomData<fn(T)>,
}

impl<T, D> Delivery<T, D>
where
    D: FnOnce(Token, Result<T, FlickrError>),
{
    fn new(token: Token, deliver: D) -> Self {
        Self {
            token,
            deliver: Some(deliver),
            _result: PhantomData,
        }
    }

    fn complete(mut self, result: Result<T, FlickrError>) {
        if let Some(deliver) = self.deliver.take() {
            deliver(self.token, result);
        }
    }
}

impl<T, D> Drop for Delivery<T, D>
where
    D: FnOnce(Token, Result<T, FlickrError>),
{
    fn drop(&mut self) {
        if let Some(deliver) = self.deliver.take() {
            log::warn!("{} abandoned before completion", self.token);
            deliver(self.token, Err(FlickrError::CallAbandoned));
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

/// Service-wide error codes per the Flickr API site.
///
/// Method-specific codes (below 95) are not listed; they only make sense alongside the
/// method that returned them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum ApiErrorCode {
    SslRequired = 95,
    InvalidSignature = 96,
    MissingSignature = 97,
    InvalidAuthToken = 98,
    InsufficientPermissions = 99,
    InvalidApiKey = 100,
    ServiceUnavailable = 105,
    WriteOperationFailed = 106,
    FormatNotFound = 111,
    MethodNotFound = 112,
    InvalidSoapEnvelope = 114,
    InvalidXmlRpcCall = 115,
    BadUrl = 116,
}

fn api_error(err: &XmlElement) -> FlickrError {
    match err.attr("code").and_then(|c| c.trim().parse::<u32>().ok()) {
        Some(code) => {
            let message = err.attr("msg").unwrap_or_default().to_string();
            log::warn!("API Response was error: {code}, msg: {message}");
            FlickrError::Api { code, message }
        }
        None => FlickrError::MalformedResponse("error element without a numeric code".into()),
    }
}

/// Classifies a raw response into the `<rsp>` root of a success or an error
pub fn classify_response(resp: &WireResponse) -> Result<XmlElement, FlickrError> {
    let http_ok = (200..300).contains(&resp.status);
    let root = match XmlElement::parse(&resp.body) {
        Ok(root) => root,
        Err(_) if !http_ok => return Err(FlickrError::HttpStatus(resp.status)),
        Err(err) => return Err(err),
    };

    if root.name == "err" {
        return Err(api_error(&root));
    }
    match root.attr("stat") {
        Some("ok") => Ok(root),
        Some("fail") => Err(root.child("err").map_or_else(
            || FlickrError::MalformedResponse("failure status without an error element".into()),
            api_error,
        )),
        _ if !http_ok => Err(FlickrError::HttpStatus(resp.status)),
        _ => Err(FlickrError::MalformedResponse(format!(
            "<{}> has no recognised status",
            root.name
        ))),
    }
}
