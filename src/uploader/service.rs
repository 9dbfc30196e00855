/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::uploader::scan::{ImageKind, file_name_of};
use crate::v1::{
    Album, AlbumsPage, Client, GPhotosError, MediaItem, NewMediaItem, UploadToken, upload,
};
use bytes::Bytes;
use std::path::Path;

/// The remote operations the uploader needs from the photo library service.
///
/// [`Client`] implements this against the real API; tests drive the uploader
/// with an in-memory implementation instead.
#[allow(async_fn_in_trait)]
pub trait PhotosLibrary {
    /// Retrieves one page of the album listing
    async fn list_albums_page(
        &self,
        exclude_non_app_created: bool,
        page_token: Option<&str>,
    ) -> Result<AlbumsPage, GPhotosError>;

    /// Creates a new album with the given title
    async fn create_album(&self, title: &str) -> Result<Album, GPhotosError>;

    /// Uploads raw image bytes, yielding the token to link with
    async fn upload_bytes(
        &self,
        file_name: &str,
        kind: ImageKind,
        data: Bytes,
    ) -> Result<UploadToken, GPhotosError>;

    /// Exchanges an upload token for a durable media item, optionally scoped
    /// to an album. With no album id the item is only added to the library.
    async fn link_media_item(
        &self,
        album_id: Option<&str>,
        file_name: &str,
        upload_token: &UploadToken,
    ) -> Result<(), GPhotosError>;
}

impl PhotosLibrary for Client {
    async fn list_albums_page(
        &self,
        exclude_non_app_created: bool,
        page_token: Option<&str>,
    ) -> Result<AlbumsPage, GPhotosError> {
        Album::list_page(self, exclude_non_app_created, page_token).await
    }

    async fn create_album(&self, title: &str) -> Result<Album, GPhotosError> {
        Album::create(self, title).await
    }

    async fn upload_bytes(
        &self,
        file_name: &str,
        kind: ImageKind,
        data: Bytes,
    ) -> Result<UploadToken, GPhotosError> {
        log::debug!("uploading {file_name} ({} bytes)", data.len());
        upload::upload_bytes(self, kind.mime_type(), data).await
    }

    async fn link_media_item(
        &self,
        album_id: Option<&str>,
        file_name: &str,
        upload_token: &UploadToken,
    ) -> Result<(), GPhotosError> {
        let items = [NewMediaItem::from_upload(file_name, upload_token)];
        let results = MediaItem::batch_create(self, album_id, &items).await?;
        let result = results
            .into_iter()
            .next()
            .ok_or(GPhotosError::ResponseMissing())?;
        if result.status.is_ok()? {
            Ok(())
        } else {
            Err(GPhotosError::ItemNotCreated(
                result.status.code.unwrap_or_default(),
                result.status.message.unwrap_or_default(),
            ))
        }
    }
}

/// Uploads a single image file and links it into an album, in that order.
/// The returned future resolves only once both steps have completed, so a
/// caller can sequence its own completion handling after the await.
pub async fn upload_and_link<S: PhotosLibrary>(
    service: &S,
    album_id: Option<&str>,
    path: &Path,
) -> Result<(), GPhotosError> {
    let kind = ImageKind::from_path(path)
        .ok_or_else(|| GPhotosError::UnsupportedImage(path.display().to_string()))?;
    let data = tokio::fs::read(path).await?;
    let file_name = file_name_of(path);
    let token = service
        .upload_bytes(&file_name, kind, Bytes::from(data))
        .await?;
    service.link_media_item(album_id, &file_name, &token).await
}
