/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::GPhotosError;
use crate::v1::parsers::{from_empty_str_to_none, from_str_to_u64};
use crate::v1::upload::UploadToken;
use crate::v1::{API_ORIGIN, Client, NUM_TO_GET};
use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures::Stream;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// Holds information returned from the MediaItem API.
///
/// See the Photos Library API reference for more details on the individual
/// fields.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MediaItem {
    #[serde(rename = "id")]
    pub id: String,

    #[serde(
        default,
        rename = "description",
        deserialize_with = "from_empty_str_to_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(rename = "productUrl", skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,

    #[serde(rename = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(rename = "filename", skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(rename = "mediaMetadata", skip_serializing_if = "Option::is_none")]
    pub media_metadata: Option<MediaMetadata>,
}

/// Media specific metadata of a [`MediaItem`]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MediaMetadata {
    #[serde(rename = "creationTime", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    #[serde(
        default,
        rename = "width",
        deserialize_with = "from_str_to_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<u64>,

    #[serde(
        default,
        rename = "height",
        deserialize_with = "from_str_to_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<u64>,
}

impl MediaItem {
    /// Exchanges upload tokens for durable media items, optionally scoped to
    /// an album. With no album id the items are only added to the library.
    pub async fn batch_create(
        client: &Client,
        album_id: Option<&str>,
        items: &[NewMediaItem],
    ) -> Result<Vec<NewMediaItemResult>, GPhotosError> {
        let req_url = url::Url::parse(API_ORIGIN)?.join("/v1/mediaItems:batchCreate")?;
        let req = BatchCreateMediaItemsRequest {
            album_id: album_id.map(String::from),
            new_media_items: items.to_vec(),
        };
        let data = serde_json::to_vec(&req)?;
        let resp = client
            .post::<BatchCreateMediaItemsResponse>(req_url.as_str(), data)
            .await?;
        Ok(resp.new_media_item_results)
    }

    /// Retrieves information about the media items associated with an Album
    /// and returns them as a stream, requesting further pages as the stream
    /// is consumed.
    pub fn search_in_album(
        client: Client,
        album_id: String,
    ) -> impl Stream<Item = Result<MediaItem, GPhotosError>> {
        try_stream! {
            let req_url = url::Url::parse(API_ORIGIN)?.join("/v1/mediaItems:search")?;
            let mut page_token: Option<String> = None;
            loop {
                let req = SearchMediaItemsRequest {
                    album_id: album_id.clone(),
                    page_size: NUM_TO_GET as u32,
                    page_token: page_token.clone(),
                };
                let data = serde_json::to_vec(&req)?;
                let resp = client
                    .post::<SearchMediaItemsResponse>(req_url.as_str(), data)
                    .await?;
                for item in resp.media_items {
                    yield item;
                }
                match resp.next_page_token {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
        }
    }
}

/// A media item to be created from a previously uploaded file
#[derive(Serialize, Debug, Clone)]
pub struct NewMediaItem {
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "simpleMediaItem")]
    pub simple_media_item: SimpleMediaItem,
}

#[derive(Serialize, Debug, Clone)]
pub struct SimpleMediaItem {
    #[serde(rename = "fileName", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(rename = "uploadToken")]
    pub upload_token: String,
}

impl NewMediaItem {
    /// Builds the creation payload for a successful upload
    pub fn from_upload(file_name: &str, token: &UploadToken) -> Self {
        Self {
            description: None,
            simple_media_item: SimpleMediaItem {
                file_name: Some(file_name.to_string()),
                upload_token: token.as_str().to_string(),
            },
        }
    }
}

/// Per-item outcome of a batch creation call
#[derive(Deserialize, Debug, Clone)]
pub struct NewMediaItemResult {
    #[serde(rename = "uploadToken")]
    pub upload_token: Option<String>,

    #[serde(default, rename = "status")]
    pub status: RpcStatus,

    #[serde(rename = "mediaItem")]
    pub media_item: Option<MediaItem>,
}

/// RPC status attached to each batch creation result. The code is omitted on
/// the wire when the item was created successfully.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RpcStatus {
    #[serde(rename = "code")]
    pub code: Option<i32>,

    #[serde(rename = "message")]
    pub message: Option<String>,
}

impl RpcStatus {
    /// Determine if this status reports a successfully created item
    pub fn is_ok(&self) -> Result<bool, GPhotosError> {
        match self.code {
            None => Ok(true),
            Some(code) => Ok(matches!(RpcCode::try_from(code)?, RpcCode::Ok)),
        }
    }
}

/// RPC codes used by the batch creation statuses
#[derive(Debug, TryFromPrimitive)]
#[repr(i32)]
pub enum RpcCode {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

// Request body for a batch creation call
#[derive(Serialize, Debug)]
struct BatchCreateMediaItemsRequest {
    #[serde(rename = "albumId", skip_serializing_if = "Option::is_none")]
    album_id: Option<String>,

    #[serde(rename = "newMediaItems")]
    new_media_items: Vec<NewMediaItem>,
}

// Expected response from a batch creation call
#[derive(Deserialize, Debug)]
struct BatchCreateMediaItemsResponse {
    #[serde(default, rename = "newMediaItemResults")]
    new_media_item_results: Vec<NewMediaItemResult>,
}

// Request body for an in-album media item search
#[derive(Serialize, Debug)]
struct SearchMediaItemsRequest {
    #[serde(rename = "albumId")]
    album_id: String,

    #[serde(rename = "pageSize")]
    page_size: u32,

    #[serde(rename = "pageToken", skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
}

// Expected response from a media item search
#[derive(Deserialize, Debug)]
struct SearchMediaItemsResponse {
    #[serde(default, rename = "mediaItems")]
    media_items: Vec<MediaItem>,

    #[serde(
        default,
        rename = "nextPageToken",
        deserialize_with = "from_empty_str_to_none"
    )]
    next_page_token: Option<String>,
}
