/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::GPhotosError;
use crate::v1::parsers::{from_empty_str_to_none, from_str_to_u64};
use crate::v1::{API_ORIGIN, Client, NUM_TO_GET_STRING};
use async_stream::try_stream;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Holds information returned from the Album API.
///
/// See the Photos Library API reference for more details on the individual
/// fields.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Album {
    #[serde(rename = "id")]
    pub id: String,

    // Albums shared into the library may carry no title
    #[serde(
        default,
        rename = "title",
        deserialize_with = "from_empty_str_to_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    #[serde(rename = "productUrl", skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,

    #[serde(rename = "isWriteable", skip_serializing_if = "Option::is_none")]
    pub is_writeable: Option<bool>,

    #[serde(
        default,
        rename = "mediaItemsCount",
        deserialize_with = "from_str_to_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_items_count: Option<u64>,

    #[serde(rename = "coverPhotoBaseUrl", skip_serializing_if = "Option::is_none")]
    pub cover_photo_base_url: Option<String>,

    #[serde(
        rename = "coverPhotoMediaItemId",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_photo_media_item_id: Option<String>,
}

impl Album {
    const BASE_URI: &'static str = "/v1/albums";

    /// Returns information for the specified album id
    pub async fn from_id(client: &Client, id: &str) -> Result<Self, GPhotosError> {
        let req_url = url::Url::parse(API_ORIGIN)?
            .join("/v1/albums/")?
            .join(id)?;
        client.get::<Album>(req_url.as_str(), None).await
    }

    /// Creates a new album with the given title
    pub async fn create(client: &Client, title: &str) -> Result<Self, GPhotosError> {
        let req_url = url::Url::parse(API_ORIGIN)?.join(Self::BASE_URI)?;
        let data = serde_json::to_vec(&json!({"album": {"title": title}}))?;
        client.post::<Album>(req_url.as_str(), data).await
    }

    /// Retrieves one page of the album listing. The returned page carries the
    /// token to feed back for the next page, if any.
    pub async fn list_page(
        client: &Client,
        exclude_non_app_created: bool,
        page_token: Option<&str>,
    ) -> Result<AlbumsPage, GPhotosError> {
        let req_url = url::Url::parse(API_ORIGIN)?.join(Self::BASE_URI)?;
        let exclude = if exclude_non_app_created { "true" } else { "false" };
        let mut params: Vec<(&str, &str)> = vec![
            ("pageSize", NUM_TO_GET_STRING),
            ("excludeNonAppCreatedData", exclude),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        client.get::<AlbumsPage>(req_url.as_str(), Some(&params)).await
    }

    /// Retrieves information about the albums of the library and returns them
    /// as a stream, requesting further pages as the stream is consumed.
    pub fn list(
        client: Client,
        exclude_non_app_created: bool,
    ) -> impl Stream<Item = Result<Album, GPhotosError>> {
        try_stream! {
            let mut page_token: Option<String> = None;
            loop {
                let page =
                    Self::list_page(&client, exclude_non_app_created, page_token.as_deref())
                        .await?;
                for album in page.albums {
                    yield album;
                }
                match page.next_page_token {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
        }
    }
}

/// One page of the paginated album listing
#[derive(Deserialize, Debug, Default, Clone)]
pub struct AlbumsPage {
    #[serde(default, rename = "albums")]
    pub albums: Vec<Album>,

    #[serde(
        default,
        rename = "nextPageToken",
        deserialize_with = "from_empty_str_to_none"
    )]
    pub next_page_token: Option<String>,
}
