/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Per-call correlation.
//!
//! Every dispatched call gets a fresh [`Token`] before any network I/O starts. The call's
//! outcome is delivered exactly once, tagged with that token, either through the
//! [`PendingCall`] future or through the continuations handed to
//! [`crate::rest::ApiClient::dispatch_with`]. A call moves from created, to dispatched once
//! its token is issued, to completed when its outcome is delivered; there is no retry
//! and no cancellation.

use crate::rest::errors::FlickrError;
use futures::channel::oneshot;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Opaque handle correlating a call with its single completion.
///
/// Unique within the process and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u64);

impl Token {
    /// Issues a fresh token
    pub(crate) fn issue() -> Self {
        Token(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "call-{}", self.0)
    }
}

/// The outcome of a dispatched call, tagged with the call's token
#[derive(Debug)]
pub struct Completion<T> {
    pub token: Token,
    pub result: Result<T, FlickrError>,
}

impl<T> Completion<T> {
    pub fn into_result(self) -> Result<T, FlickrError> {
        self.result
    }
}

/// A call that has been dispatched and has not yet completed.
///
/// Resolves to the call's [`Completion`]. Dropping it only discards interest in the
/// result; the call itself still runs to completion.
#[derive(Debug)]
pub struct PendingCall<T> {
    token: Token,
    receiver: oneshot::Receiver<Result<T, FlickrError>>,
}

impl<T> PendingCall<T> {
    /// Creates the pending side of a call together with the sender used to complete it
    pub(crate) fn channel(token: Token) -> (Self, oneshot::Sender<Result<T, FlickrError>>) {
        let (sender, receiver) = oneshot::channel();
        (Self { token, receiver }, sender)
    }

    pub fn token(&self) -> Token {
        self.token
    }

    /// Waits for the call and returns just its result
    pub async fn result(self) -> Result<T, FlickrError> {
        self.await.result
    }
}

impl<T> Future for PendingCall<T> {
    type Output = Completion<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let token = self.token;
        Pin::new(&mut self.receiver).poll(cx).map(|received| Completion {
            token,
            // The sender only goes away without sending if the worker task died
            result: received.unwrap_or_else(|_| Err(FlickrError::CallAbandoned)),
        })
    }
}
