/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use bytes::Bytes;
use flickr::rest::{Client, Creds, FlickrError, Transport, WireRequest, WireResponse};
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = dyn Fn(&WireRequest) -> (Duration, Result<WireResponse, FlickrError>) + Send + Sync;

/// Transport double that records every request and answers from a closure
pub struct MockTransport {
    requests: Mutex<Vec<WireRequest>>,
    responder: Box<Responder>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new(
        responder: impl Fn(&WireRequest) -> (Duration, Result<WireResponse, FlickrError>)
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Always answers with the same body
    pub fn replying(body: &'static str) -> Arc<Self> {
        Self::new(move |_| (Duration::ZERO, Ok(ok(body))))
    }

    /// Echoes the request parameters back the way `flickr.test.echo` does
    pub fn echoing() -> Arc<Self> {
        Self::new(|req| (Duration::ZERO, Ok(echo_response(req))))
    }

    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn invocations(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: WireRequest) -> BoxFuture<'static, Result<WireResponse, FlickrError>> {
        let (delay, result) = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}

#[allow(dead_code)]
pub fn ok(body: &str) -> WireResponse {
    WireResponse {
        status: 200,
        body: Bytes::from(body.to_string()),
    }
}

#[allow(dead_code)]
pub fn echo_response(req: &WireRequest) -> WireResponse {
    let mut body = String::from(r#"<rsp stat="ok">"#);
    for (name, value) in &req.params {
        body.push_str(&format!("<{name}>{value}</{name}>"));
    }
    body.push_str("</rsp>");
    ok(&body)
}

#[allow(dead_code)]
pub fn param<'a>(req: &'a WireRequest, name: &str) -> Option<&'a str> {
    req.params
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

#[allow(dead_code)]
pub fn client_with(creds: Creds, transport: Arc<MockTransport>) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();
    Client::builder(creds)
        .transport(transport)
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub(crate) fn get_read_only_creds() -> anyhow::Result<Creds> {
    let api_key = std::env::var("FLICKR_API_KEY")?;
    Ok(Creds::from_tokens(&api_key, None, None, None))
}
