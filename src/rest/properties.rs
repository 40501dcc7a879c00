/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::macros::{wire_ordinal_enum, wire_token_enum};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Permission level granted to a set of credentials.
///
/// Levels are totally ordered: each level implies every level below it, so a token
/// granted `Delete` may also write and read.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Permission {
    #[default]
    None,
    Read,
    Write,
    Delete,
}

/// Safe search filter, transmitted as its ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SafetyLevel {
    Safe = 1,
    Moderate = 2,
    Restricted = 3,
}

/// Content type filter, transmitted as its ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ContentType {
    PhotosOnly = 1,
    ScreenshotsOnly = 2,
    OtherOnly = 3,
    PhotosAndScreenshots = 4,
    ScreenshotsAndOther = 5,
    PhotosAndOther = 6,
    All = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum PhotoSearchSortOrder {
    #[strum(serialize = "date-posted-asc")]
    DatePostedAscending,
    #[strum(serialize = "date-posted-desc")]
    DatePostedDescending,
    #[strum(serialize = "date-taken-asc")]
    DateTakenAscending,
    #[strum(serialize = "date-taken-desc")]
    DateTakenDescending,
    #[strum(serialize = "interestingness-asc")]
    InterestingnessAscending,
    #[strum(serialize = "interestingness-desc")]
    InterestingnessDescending,
    #[strum(serialize = "relevance")]
    Relevance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum MediaType {
    All,
    Photos,
    Videos,
}

/// Whether a tag search matches any or all of the tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum TagMode {
    Any,
    All,
}

/// Media kind reported on a photo record
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Media {
    Unknown,
    Photo,
    Video,
}

// Wire representation of every enumerated parameter lives here.
wire_ordinal_enum!(SafetyLevel => u8, ContentType => u8);
wire_token_enum!(PhotoSearchSortOrder, MediaType, TagMode, Permission);
