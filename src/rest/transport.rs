/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::{HttpVerb, WireParams};
use bytes::Bytes;
use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

/// A fully built request, ready to go on the wire
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub verb: HttpVerb,
    pub endpoint: Url,
    pub params: WireParams,
}

impl WireRequest {
    /// Endpoint with the parameters in the query string
    pub fn query_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(self.params.iter());
        url
    }

    /// Parameters as an `application/x-www-form-urlencoded` body
    pub fn form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }
}

/// Raw response as received from the endpoint
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Performs the HTTP exchange for a call.
///
/// GET requests carry their parameters in the query string and POST requests in a
/// form-encoded body; nothing else differs between the two.
pub trait Transport: Send + Sync {
    fn send(&self, request: WireRequest) -> BoxFuture<'static, Result<WireResponse, FlickrError>>;
}

/// Default [`Transport`] backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    https_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(
        user_agent: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, FlickrError> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent.to_string());
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let https_client = builder
            .build()
            .map_err(|e| FlickrError::InvalidArgument("transport".into(), e.to_string()))?;
        Ok(Self { https_client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: WireRequest) -> BoxFuture<'static, Result<WireResponse, FlickrError>> {
        let client = self.https_client.clone();
        Box::pin(async move {
            let builder = match request.verb {
                HttpVerb::Get => client.get(request.query_url()),
                HttpVerb::Post => client
                    .post(request.endpoint.clone())
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(request.form_body()),
            };
            let resp = builder.header(ACCEPT, "text/xml").send().await?;
            let status = resp.status().as_u16();
            let body = resp.bytes().await?;
            log::trace!("Received {} bytes with HTTP status {status}", body.len());
            Ok(WireResponse { status, body })
        })
    }
}
