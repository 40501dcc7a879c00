/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::XmlElement;
use crate::rest::errors::FlickrError;
use chrono::{DateTime, Utc};
use std::str::FromStr;

// Child element that must be present
pub fn required_child<'a>(el: &'a XmlElement, name: &str) -> Result<&'a XmlElement, FlickrError> {
    el.child(name)
        .ok_or_else(|| FlickrError::ResponseMissing(format!("<{name}> in <{}>", el.name)))
}

// Attribute that must be present
pub fn required_attr<'a>(el: &'a XmlElement, name: &str) -> Result<&'a str, FlickrError> {
    el.attr(name)
        .ok_or_else(|| FlickrError::ResponseMissing(format!("{}@{name}", el.name)))
}

// Attributes that may be "" are treated as missing
pub fn optional_attr(el: &XmlElement, name: &str) -> Option<String> {
    el.attr(name)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

// Parses a required attribute
pub fn parse_attr<T: FromStr>(el: &XmlElement, name: &str) -> Result<T, FlickrError> {
    let raw = required_attr(el, name)?;
    raw.trim().parse().map_err(|_| {
        FlickrError::MalformedResponse(format!("{}@{name} has unexpected value {raw:?}", el.name))
    })
}

// Parses an attribute, falling back to the default when it is missing or empty
pub fn parse_attr_or<T: FromStr>(el: &XmlElement, name: &str, default: T) -> Result<T, FlickrError> {
    match el.attr(name).filter(|v| !v.trim().is_empty()) {
        Some(_) => parse_attr(el, name),
        None => Ok(default),
    }
}

// Flags come back as "1"/"0"
pub fn bool_attr(el: &XmlElement, name: &str) -> bool {
    matches!(el.attr(name).map(str::trim), Some("1") | Some("true"))
}

// Dates come back as seconds since the Unix epoch
pub fn date_attr(el: &XmlElement, name: &str) -> Result<Option<DateTime<Utc>>, FlickrError> {
    let Some(raw) = el.attr(name).map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let seconds: i64 = raw.parse().map_err(|_| {
        FlickrError::MalformedResponse(format!("{}@{name} is not a timestamp: {raw:?}", el.name))
    })?;
    DateTime::from_timestamp(seconds, 0)
        .map(Some)
        .ok_or_else(|| FlickrError::MalformedResponse(format!("{}@{name} out of range", el.name)))
}
