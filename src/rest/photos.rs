/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::macros::gated_call;
use crate::rest::params::require;
use crate::rest::parsers::required_child;
use crate::rest::{
    Client, ContentType, MediaType, MethodCall, Params, PendingCall, Permission, PhotoInfo,
    PhotoPage, PhotoSearchSortOrder, PhotoSummary, SafetyLevel, TagMode, XmlElement,
};
use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures::Stream;

/// The `flickr.photos.*` methods
#[derive(Debug, Clone, Copy)]
pub struct PhotosApi<'a> {
    client: &'a Client,
}

/// Filters for `flickr.photos.search`. Anything left as `None` is not sent.
#[derive(Debug, Clone, Default)]
pub struct PhotoSearchOptions {
    pub user_id: Option<String>,
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
    pub tag_mode: Option<TagMode>,
    pub min_upload_date: Option<DateTime<Utc>>,
    pub max_upload_date: Option<DateTime<Utc>>,
    pub safe_search: Option<SafetyLevel>,
    pub content_type: Option<ContentType>,
    pub media: Option<MediaType>,
    pub sort: Option<PhotoSearchSortOrder>,
    pub has_geo: Option<bool>,
    pub in_gallery: Option<bool>,
    pub extras: Option<Vec<String>>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl PhotoSearchOptions {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("user_id", self.user_id.as_ref())
            .with("text", self.text.as_ref())
            .with("tags", self.tags.clone())
            .with_enum("tag_mode", self.tag_mode.as_ref())
            .with("min_upload_date", self.min_upload_date)
            .with("max_upload_date", self.max_upload_date)
            .with_enum("safe_search", self.safe_search.as_ref())
            .with_enum("content_type", self.content_type.as_ref())
            .with_enum("media", self.media.as_ref())
            .with_enum("sort", self.sort.as_ref())
            .with("has_geo", self.has_geo)
            .with("in_gallery", self.in_gallery)
            .with("extras", self.extras.clone())
            .with("per_page", self.per_page)
            .with("page", self.page)
    }
}

fn page_of_photos(rsp: &XmlElement) -> Result<PhotoPage, FlickrError> {
    PhotoPage::from_xml(required_child(rsp, "photos")?)
}

// Tags containing spaces have to be quoted
fn tag_list(tags: &[&str]) -> Result<String, FlickrError> {
    let tags: Vec<String> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| {
            if t.contains(' ') {
                format!("\"{t}\"")
            } else {
                t.to_string()
            }
        })
        .collect();
    if tags.is_empty() {
        return Err(FlickrError::EmptyList("tags".into()));
    }
    Ok(tags.join(" "))
}

impl<'a> PhotosApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Retrieves the details of a photo
    pub fn get_info(
        &self,
        photo_id: &str,
        secret: Option<&str>,
    ) -> Result<PendingCall<PhotoInfo>, FlickrError> {
        gated_call!(
            self.client,
            Permission::None,
            MethodCall::get(
                "flickr.photos.getInfo",
                Params::new()
                    .with("photo_id", require("photo_id", photo_id)?)
                    .with("secret", secret),
            )
            .authenticated(),
            |rsp: &XmlElement| PhotoInfo::from_xml(required_child(rsp, "photo")?)
        )
    }

    /// Retrieves a single page of search results
    pub fn search(&self, options: &PhotoSearchOptions) -> Result<PendingCall<PhotoPage>, FlickrError> {
        gated_call!(
            self.client,
            Permission::None,
            MethodCall::get("flickr.photos.search", options.to_params()).authenticated(),
            page_of_photos
        )
    }

    /// Streams every search result, requesting further pages as needed.
    ///
    /// Starts at `options.page`, or the first page when unset.
    pub fn search_stream(
        self,
        options: PhotoSearchOptions,
    ) -> impl Stream<Item = Result<PhotoSummary, FlickrError>> + 'a {
        let client = self.client;
        try_stream! {
            let mut page = options.page.unwrap_or(1);
            loop {
                let mut options = options.clone();
                options.page = Some(page);
                let result = PhotosApi::new(client).search(&options)?.result().await?;
                let is_done = result.is_last();
                for photo in result.photos {
                    yield photo;
                }
                if is_done {
                    break;
                }
                page += 1;
            }
        }
    }

    /// Adds tags to a photo
    pub fn add_tags(&self, photo_id: &str, tags: &[&str]) -> Result<PendingCall<()>, FlickrError> {
        gated_call!(
            self.client,
            Permission::Write,
            MethodCall::post(
                "flickr.photos.addTags",
                Params::new()
                    .with("photo_id", require("photo_id", photo_id)?)
                    .with("tags", tag_list(tags)?),
            )
            .authenticated(),
            |_: &XmlElement| Ok(())
        )
    }

    /// Sets the title and description of a photo
    pub fn set_meta(
        &self,
        photo_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<PendingCall<()>, FlickrError> {
        gated_call!(
            self.client,
            Permission::Write,
            MethodCall::post(
                "flickr.photos.setMeta",
                Params::new()
                    .with("photo_id", require("photo_id", photo_id)?)
                    .with("title", title)
                    .with("description", description),
            )
            .authenticated(),
            |_: &XmlElement| Ok(())
        )
    }

    /// Deletes a photo
    pub fn delete(&self, photo_id: &str) -> Result<PendingCall<()>, FlickrError> {
        gated_call!(
            self.client,
            Permission::Delete,
            MethodCall::post(
                "flickr.photos.delete",
                Params::new().with("photo_id", require("photo_id", photo_id)?),
            )
            .authenticated(),
            |_: &XmlElement| Ok(())
        )
    }
}
