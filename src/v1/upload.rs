/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::GPhotosError;
use crate::v1::{API_ORIGIN, Client};
use bytes::Bytes;
use std::fmt;

/// Opaque handle returned by a successful byte upload. It is exchanged for a
/// durable media item via [`MediaItem::batch_create`](crate::v1::MediaItem::batch_create).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadToken(String);

impl UploadToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UploadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uploads raw image bytes and returns the upload token. The token is not a
/// media item yet; linking happens through the batch creation call.
pub async fn upload_bytes(
    client: &Client,
    content_type: &str,
    data: Bytes,
) -> Result<UploadToken, GPhotosError> {
    let req_url = url::Url::parse(API_ORIGIN)?.join("/v1/uploads")?;
    let token = client.upload(req_url.as_str(), content_type, data).await?;
    if token.is_empty() {
        return Err(GPhotosError::ResponseMissing());
    }
    Ok(UploadToken(token))
}
