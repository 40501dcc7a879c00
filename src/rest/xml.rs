/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// An owned XML element as returned by the REST endpoint.
///
/// Projectors receive the `<rsp>` root of a successful response and pick the
/// method-specific sub-tree out of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

fn malformed(err: impl std::fmt::Display) -> FlickrError {
    FlickrError::MalformedResponse(err.to_string())
}

impl XmlElement {
    /// Parses a complete document and returns its root element
    pub fn parse(body: &[u8]) -> Result<Self, FlickrError> {
        let body = std::str::from_utf8(body).map_err(malformed)?;
        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(e) => stack.push(Self::from_start(&e)?),
                Event::Empty(e) => {
                    let element = Self::from_start(&e)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| malformed("unexpected closing tag"))?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(t) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&t.unescape().map_err(malformed)?);
                    }
                }
                Event::CData(c) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => (),
            }
        }

        if !stack.is_empty() {
            return Err(malformed("document ended inside an element"));
        }
        root.ok_or_else(|| malformed("document has no root element"))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, FlickrError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(malformed)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<(), FlickrError> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => return Err(malformed("document has more than one root element")),
        }
        Ok(())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the named child, if the child exists
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_document() {
        let doc = br#"<?xml version="1.0" encoding="utf-8" ?>
<rsp stat="ok">
  <photo id="2733" secret="123456">
    <title>Sunset &amp; sea</title>
    <tags><tag id="1" raw="Beach">beach</tag><tag id="2" raw="sun">sun</tag></tags>
  </photo>
</rsp>"#;
        let root = XmlElement::parse(doc).unwrap();
        assert_eq!(root.name, "rsp");
        assert_eq!(root.attr("stat"), Some("ok"));

        let photo = root.child("photo").unwrap();
        assert_eq!(photo.attr("id"), Some("2733"));
        assert_eq!(photo.child_text("title"), Some("Sunset & sea"));
        let tags: Vec<_> = photo
            .child("tags")
            .unwrap()
            .children_named("tag")
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(tags, vec!["beach", "sun"]);
    }

    #[test]
    fn rejects_truncated_and_empty_bodies() {
        assert!(matches!(
            XmlElement::parse(b"<rsp stat=\"ok\"><photo>"),
            Err(FlickrError::MalformedResponse(_))
        ));
        assert!(matches!(
            XmlElement::parse(b""),
            Err(FlickrError::MalformedResponse(_))
        ));
        assert!(XmlElement::parse(b"<html><body>Bad Gateway</html>").is_err());
    }
}
