/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use chrono::{DateTime, Utc};

/// Parameters after serialization, in the form they are transmitted
pub type WireParams = Vec<(String, String)>;

/// Enumerations that can be sent as a request parameter.
///
/// Implemented through `wire_token_enum!` or `wire_ordinal_enum!` in `properties.rs`,
/// depending on whether the service expects the declared token or the ordinal.
pub trait WireEnum {
    fn wire_value(&self) -> String;
}

/// A request parameter value before serialization
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Absent,
    Str(String),
    Int(i64),
    Bool(bool),
    Enum(String),
    Date(DateTime<Utc>),
    List(Vec<String>),
}

impl ParamValue {
    /// Wraps an enumerated value using its declared wire form
    pub fn enumerated<E: WireEnum>(value: &E) -> Self {
        ParamValue::Enum(value.wire_value())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ParamValue::Absent)
    }

    /// Serializes the value for the parameter `name`.
    ///
    /// `Ok(None)` means the parameter is not transmitted at all.
    pub fn to_wire(&self, name: &str) -> Result<Option<String>, FlickrError> {
        let wire = match self {
            ParamValue::Absent => return Ok(None),
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Bool(true) => "1".to_string(),
            ParamValue::Bool(false) => "0".to_string(),
            ParamValue::Enum(token) => token.clone(),
            ParamValue::Date(date) => date.timestamp().to_string(),
            ParamValue::List(items) => {
                if items.is_empty() {
                    return Err(FlickrError::EmptyList(name.to_string()));
                }
                items.join(",")
            }
        };
        Ok(Some(wire))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        ParamValue::Date(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(value: &[&str]) -> Self {
        ParamValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Absent, Into::into)
    }
}

/// Named parameters for a single API call.
///
/// Names are unique; inserting a name twice replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds an optional enumerated parameter, builder style
    pub fn with_enum<E: WireEnum>(self, name: &str, value: Option<&E>) -> Self {
        let value = value.map_or(ParamValue::Absent, ParamValue::enumerated);
        self.with(name, value)
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes every parameter, dropping absent ones
    pub fn to_wire(&self) -> Result<WireParams, FlickrError> {
        let mut wire = Vec::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            if let Some(v) = value.to_wire(name)? {
                wire.push((name.clone(), v));
            }
        }
        Ok(wire)
    }
}

/// Validates a required string argument, failing when it is empty
pub fn require<'a>(name: &str, value: &'a str) -> Result<&'a str, FlickrError> {
    if value.trim().is_empty() {
        return Err(FlickrError::MissingArgument(name.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{PhotoSearchSortOrder, SafetyLevel};
    use chrono::TimeZone;

    #[test]
    fn serialization_table() {
        let date = Utc.with_ymd_and_hms(2009, 2, 13, 23, 31, 30).unwrap();
        let wire = Params::new()
            .with("text", "sunset over water")
            .with("per_page", 50u32)
            .with("has_geo", true)
            .with("in_gallery", false)
            .with("min_upload_date", date)
            .with("tags", vec!["a".to_string(), "b c".to_string()])
            .with_enum("safe_search", Some(&SafetyLevel::Moderate))
            .with_enum("sort", Some(&PhotoSearchSortOrder::DateTakenDescending))
            .to_wire()
            .unwrap();

        let expected: WireParams = [
            ("text", "sunset over water"),
            ("per_page", "50"),
            ("has_geo", "1"),
            ("in_gallery", "0"),
            ("min_upload_date", "1234567890"),
            ("tags", "a,b c"),
            ("safe_search", "2"),
            ("sort", "date-taken-desc"),
        ]
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();
        assert_eq!(wire, expected);
    }

    #[test]
    fn absent_values_are_omitted() {
        let page: Option<u32> = None;
        let wire = Params::new()
            .with("photo_id", "42")
            .with("page", page)
            .with_enum::<SafetyLevel>("safe_search", None)
            .to_wire()
            .unwrap();
        assert_eq!(wire, vec![("photo_id".to_string(), "42".to_string())]);
    }

    #[test]
    fn empty_list_is_an_error() {
        let err = Params::new()
            .with("tags", Vec::<String>::new())
            .to_wire()
            .unwrap_err();
        assert!(matches!(err, FlickrError::EmptyList(name) if name == "tags"));
    }

    #[test]
    fn insert_replaces_existing_name() {
        let mut params = Params::new().with("page", 1u32);
        params.insert("page", 2u32);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("page"), Some(&ParamValue::Int(2)));
    }

    #[test]
    fn require_rejects_blank() {
        assert!(require("photo_id", "123").is_ok());
        assert!(matches!(
            require("photo_id", "  "),
            Err(FlickrError::MissingArgument(_))
        ));
    }
}
