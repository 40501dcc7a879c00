/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::parsers::{
    bool_attr, date_attr, optional_attr, parse_attr_or, required_attr, required_child,
};
use crate::rest::{Media, XmlElement};
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// A photo as listed by search and other list methods.
///
/// See [Flickr API Docs](https://www.flickr.com/services/api/flickr.photos.search.html) for more
/// details on the individual fields. Fields filled from `extras` are `None` unless requested.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSummary {
    pub id: String,
    pub owner: String,
    pub secret: String,
    pub server: String,
    pub farm: u32,
    pub title: String,
    pub is_public: bool,
    pub is_friend: bool,
    pub is_family: bool,

    // Extras
    pub date_uploaded: Option<DateTime<Utc>>,
    pub owner_name: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PhotoSummary {
    pub fn from_xml(photo: &XmlElement) -> Result<Self, FlickrError> {
        Ok(Self {
            id: required_attr(photo, "id")?.to_string(),
            owner: required_attr(photo, "owner")?.to_string(),
            secret: required_attr(photo, "secret")?.to_string(),
            server: required_attr(photo, "server")?.to_string(),
            farm: parse_attr_or(photo, "farm", 0)?,
            title: photo.attr("title").unwrap_or_default().to_string(),
            is_public: bool_attr(photo, "ispublic"),
            is_friend: bool_attr(photo, "isfriend"),
            is_family: bool_attr(photo, "isfamily"),
            date_uploaded: date_attr(photo, "dateupload")?,
            owner_name: optional_attr(photo, "ownername"),
            tags: photo
                .attr("tags")
                .map(|t| t.split_whitespace().map(ToString::to_string).collect()),
        })
    }
}

/// One page of photos
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoPage {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub total: u64,
    pub photos: Vec<PhotoSummary>,
}

impl PhotoPage {
    pub fn from_xml(photos: &XmlElement) -> Result<Self, FlickrError> {
        Ok(Self {
            page: parse_attr_or(photos, "page", 1)?,
            pages: parse_attr_or(photos, "pages", 0)?,
            per_page: parse_attr_or(photos, "perpage", 0)?,
            total: parse_attr_or(photos, "total", 0)?,
            photos: photos
                .children_named("photo")
                .map(PhotoSummary::from_xml)
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn is_last(&self) -> bool {
        self.photos.is_empty() || self.page >= self.pages
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub nsid: String,
    pub user_name: String,
    pub real_name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub is_public: bool,
    pub is_friend: bool,
    pub is_family: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: String,
    pub author: String,
    pub raw: String,
    pub text: String,
}

/// Full details of a single photo, as returned by `flickr.photos.getInfo`.
///
/// See [Flickr API Docs](https://www.flickr.com/services/api/flickr.photos.getInfo.html).
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoInfo {
    pub id: String,
    pub secret: String,
    pub server: String,
    pub farm: u32,
    pub media: Media,
    pub license: u32,
    pub rotation: u32,
    pub is_favorite: bool,
    pub owner: Owner,
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
    pub date_posted: Option<DateTime<Utc>>,
    pub date_taken: Option<String>,
    pub last_update: Option<DateTime<Utc>>,
    pub views: u64,
    pub tags: Vec<Tag>,
}

impl PhotoInfo {
    pub fn from_xml(photo: &XmlElement) -> Result<Self, FlickrError> {
        let owner = required_child(photo, "owner")?;
        let visibility = photo.child("visibility");
        let dates = photo.child("dates");
        let tags = photo
            .child("tags")
            .map(|t| {
                t.children_named("tag")
                    .map(|tag| -> Result<Tag, FlickrError> {
                        Ok(Tag {
                            id: required_attr(tag, "id")?.to_string(),
                            author: tag.attr("author").unwrap_or_default().to_string(),
                            raw: tag.attr("raw").unwrap_or(tag.text.as_str()).to_string(),
                            text: tag.text.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            id: required_attr(photo, "id")?.to_string(),
            secret: required_attr(photo, "secret")?.to_string(),
            server: required_attr(photo, "server")?.to_string(),
            farm: parse_attr_or(photo, "farm", 0)?,
            media: photo
                .attr("media")
                .and_then(|m| Media::from_str(m).ok())
                .unwrap_or(Media::Unknown),
            license: parse_attr_or(photo, "license", 0)?,
            rotation: parse_attr_or(photo, "rotation", 0)?,
            is_favorite: bool_attr(photo, "isfavorite"),
            owner: Owner {
                nsid: required_attr(owner, "nsid")?.to_string(),
                user_name: owner.attr("username").unwrap_or_default().to_string(),
                real_name: optional_attr(owner, "realname"),
                location: optional_attr(owner, "location"),
            },
            title: photo.child_text("title").unwrap_or_default().to_string(),
            description: photo.child_text("description").unwrap_or_default().to_string(),
            visibility: Visibility {
                is_public: visibility.is_some_and(|v| bool_attr(v, "ispublic")),
                is_friend: visibility.is_some_and(|v| bool_attr(v, "isfriend")),
                is_family: visibility.is_some_and(|v| bool_attr(v, "isfamily")),
            },
            date_posted: dates.map(|d| date_attr(d, "posted")).transpose()?.flatten(),
            date_taken: dates.and_then(|d| optional_attr(d, "taken")),
            last_update: dates.map(|d| date_attr(d, "lastupdate")).transpose()?.flatten(),
            views: parse_attr_or(photo, "views", 0)?,
            tags,
        })
    }

    /// URL of the photo's image, optionally at a size given by its letter suffix
    pub fn source_url(&self, size_suffix: Option<char>) -> String {
        let suffix = size_suffix.map(|s| format!("_{s}")).unwrap_or_default();
        format!(
            "https://live.staticflickr.com/{}/{}_{}{suffix}.jpg",
            self.server, self.id, self.secret
        )
    }
}
