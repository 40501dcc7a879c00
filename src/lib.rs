/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Flickr
//!
//! This Flickr library was created for working with the Flickr REST API.
//!
//! For further details on the API refer to the [Flickr API Docs](https://www.flickr.com/services/api/)
//!
//! ## Features
//!
//! - Signed requests (legacy `api_sig` and OAuth 1.0a HMAC-SHA1)
//! - Local permission checks: calls the credentials are not allowed to make fail
//!   immediately, without touching the network
//! - Every call returns a [`rest::Token`] right away and completes exactly once, either
//!   as a future ([`rest::PendingCall`]) or through success/failure continuations
//! - Photos: info, search (single page or streamed), tagging, metadata, deletion
//! - Token checks and the `flickr.test.*` methods
//! - Lower level interface ([`rest::ApiClient`]) for calling any other method directly
//!
//! *Getting the Access Token/Secret is left up to the consumer of this library*
//!
//! ## Usage
//!
//! **You will need to acquire an API key/secret from Flickr prior to using the API**
//!
//! ```rust,no_run
//! use flickr::rest::{Client, Creds, PhotoSearchOptions, SafetyLevel};
//! use futures::{StreamExt, pin_mut};
//!
//! async fn print_photos(api_key: &str, user_id: &str) -> anyhow::Result<()> {
//!     // The API key is the only required field for reading public data
//!     let client = Client::new(Creds::from_tokens(api_key, None, None, None))?;
//!
//!     let options = PhotoSearchOptions {
//!         user_id: Some(user_id.to_string()),
//!         safe_search: Some(SafetyLevel::Safe),
//!         ..Default::default()
//!     };
//!     let photos = client.photos().search_stream(options);
//!     pin_mut!(photos);
//!     while let Some(photo) = photos.next().await {
//!         let photo = photo?;
//!         println!("{}: {}", photo.id, photo.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod rest;
