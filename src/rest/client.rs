/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::{
    API_ENDPOINT, ApiClient, AuthApi, Creds, Permission, PhotosApi, ReqwestTransport, TestApi,
    Transport,
};
use std::sync::Arc;
use std::time::Duration;

/// Entry point for talking to the Flickr REST API.
///
/// Cheap to clone; clones share the same credentials and transport.
///
/// ```rust,no_run
/// use flickr::rest::{Client, Creds, Permission};
///
/// # async fn run() -> Result<(), flickr::rest::FlickrError> {
/// let creds = Creds::from_tokens("api-key", Some("secret"), None, None)
///     .with_auth_token("auth-token")
///     .with_permission(Permission::Read);
/// let client = Client::new(creds)?;
/// let user = client.test().login()?.result().await?;
/// println!("Logged in as {}", user.user_name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
}

impl Client {
    /// Creates a client with the default configuration on the current tokio runtime
    pub fn new(creds: Creds) -> Result<Self, FlickrError> {
        Self::builder(creds).build()
    }

    pub fn builder(creds: Creds) -> ClientBuilder {
        ClientBuilder::new(creds)
    }

    pub fn api_client(&self) -> &ApiClient {
        &self.api_client
    }

    pub fn creds(&self) -> &Creds {
        self.api_client.creds()
    }

    /// Fails when the credentials were granted less than `required`
    pub fn check_permission(&self, required: Permission) -> Result<(), FlickrError> {
        self.api_client.check_permission(required)
    }

    pub fn test(&self) -> TestApi<'_> {
        TestApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn photos(&self) -> PhotosApi<'_> {
        PhotosApi::new(self)
    }
}

/// Configuration for a [`Client`]
pub struct ClientBuilder {
    creds: Creds,
    endpoint: String,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
    runtime: Option<tokio::runtime::Handle>,
}

impl ClientBuilder {
    pub fn new(creds: Creds) -> Self {
        Self {
            creds,
            endpoint: API_ENDPOINT.to_string(),
            user_agent: None,
            timeout: None,
            transport: None,
            runtime: None,
        }
    }

    /// Overrides the REST endpoint
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Request timeout for the default transport. No timeout is applied otherwise.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the reqwest transport; user agent and timeout are then ignored
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Runtime the exchanges run on. Defaults to the runtime `build` is called from.
    pub fn runtime(mut self, runtime: tokio::runtime::Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<Client, FlickrError> {
        let endpoint = url::Url::parse(&self.endpoint)?;
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => tokio::runtime::Handle::try_current()
                .map_err(|_| FlickrError::RuntimeUnavailable)?,
        };
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                self.user_agent.as_deref(),
                self.timeout,
            )?),
        };
        log::debug!("Creating client for {endpoint}");
        Ok(Client {
            api_client: Arc::new(ApiClient::new(
                Arc::new(self.creds),
                endpoint,
                transport,
                runtime,
            )),
        })
    }
}
