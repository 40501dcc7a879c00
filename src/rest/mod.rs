/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

mod macros;
mod parsers;
pub mod api;
pub mod auth;
pub mod client;
pub mod creds;
pub mod errors;
pub mod params;
pub mod permissions;
pub mod photo;
pub mod photos;
pub mod properties;
pub mod signing;
pub mod testing;
pub mod token;
pub mod transport;
pub mod xml;

pub use api::*;
pub use auth::*;
pub use client::*;
pub use creds::*;
pub use errors::*;
pub use params::*;
pub use permissions::*;
pub use photo::*;
pub use photos::*;
pub use properties::*;
pub use testing::*;
pub use token::*;
pub use transport::*;
pub use xml::*;
