/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::rest::{ApiErrorCode, Permission};
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum FlickrError {
    #[error("Insufficient permission: {required} required, {granted} granted")]
    Permission {
        required: Permission,
        granted: Permission,
    },

    #[error("Required argument missing: {0}")]
    MissingArgument(String),

    #[error("List argument is empty: {0}")]
    EmptyList(String),

    #[error("Invalid argument {0}: {1}")]
    InvalidArgument(String, String),

    #[error("No async runtime available to dispatch calls on")]
    RuntimeUnavailable,

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status {0} without a readable API response")]
    HttpStatus(u16),

    #[error("API Response is malformed: {0}")]
    MalformedResponse(String),

    #[error("Expected response missing: {0}")]
    ResponseMissing(String),

    #[error("Call abandoned before completion")]
    CallAbandoned,

    #[error("API Response was error: {code}, msg: {message}")]
    Api { code: u32, message: String },
}

/// Broad classification of a [`FlickrError`].
///
/// `LocalPermission` and `Argument` are only ever returned synchronously, before a call is
/// dispatched, as is a client whose HTTP settings are unusable. `Transport` and `Protocol`
/// only ever arrive through a call's completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LocalPermission,
    Argument,
    Transport,
    Protocol,
}

impl FlickrError {
    pub fn kind(&self) -> ErrorKind {
        use FlickrError as E;
        match self {
            E::Permission { .. } => ErrorKind::LocalPermission,
            E::MissingArgument(_)
            | E::EmptyList(_)
            | E::InvalidArgument(..)
            | E::RuntimeUnavailable
            | E::Signing(_)
            | E::Io(_)
            | E::Deserialization(_)
            | E::UrlParsing(_) => ErrorKind::Argument,
            E::Request(_)
            | E::HttpStatus(_)
            | E::MalformedResponse(_)
            | E::ResponseMissing(_)
            | E::CallAbandoned => ErrorKind::Transport,
            E::Api { .. } => ErrorKind::Protocol,
        }
    }

    /// The documented service-wide error code, if this is a protocol error carrying one
    pub fn api_error_code(&self) -> Option<ApiErrorCode> {
        match self {
            FlickrError::Api { code, .. } => ApiErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }
}
