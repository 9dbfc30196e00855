/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
#![allow(dead_code)]

use bytes::Bytes;
use gphotos::uploader::{ImageKind, PhotosLibrary};
use gphotos::v1::{Album, AlbumsPage, GPhotosError, UploadToken};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Scriptable in-memory photo library. Records every call so tests can
/// assert what the uploader did; failures are injected per file name or
/// album title.
#[derive(Default, Clone)]
pub struct FakeLibrary {
    state: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
pub struct FakeState {
    /// Album listing pages keyed by the request's page token
    pub pages: HashMap<Option<String>, AlbumsPage>,
    /// Page tokens the uploader requested, in order
    pub list_calls: Vec<Option<String>>,
    pub fail_listing: bool,

    /// Titles created, in order
    pub created: Vec<String>,
    pub fail_create: HashSet<String>,

    /// File names uploaded, in order
    pub uploads: Vec<String>,
    pub fail_upload: HashSet<String>,

    /// (album id, file name, token) triples linked, in order
    pub links: Vec<(Option<String>, String, String)>,
    pub fail_link: HashSet<String>,

    /// Every call in order, for ordering assertions
    pub calls: Vec<String>,

    next_album_id: u32,
    next_token_id: u32,
}

impl FakeLibrary {
    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

impl PhotosLibrary for FakeLibrary {
    async fn list_albums_page(
        &self,
        _exclude_non_app_created: bool,
        page_token: Option<&str>,
    ) -> Result<AlbumsPage, GPhotosError> {
        let mut state = self.state();
        state.calls.push(format!("list:{page_token:?}"));
        state.list_calls.push(page_token.map(String::from));
        if state.fail_listing {
            return Err(GPhotosError::ApiResponse(500, "listing failed".into()));
        }
        Ok(state
            .pages
            .get(&page_token.map(String::from))
            .cloned()
            .unwrap_or_default())
    }

    async fn create_album(&self, title: &str) -> Result<Album, GPhotosError> {
        let mut state = self.state();
        state.calls.push(format!("create:{title}"));
        if state.fail_create.contains(title) {
            return Err(GPhotosError::ApiResponse(403, "create denied".into()));
        }
        state.next_album_id += 1;
        let album = album(&format!("album-{}", state.next_album_id), title);
        state.created.push(title.to_string());
        Ok(album)
    }

    async fn upload_bytes(
        &self,
        file_name: &str,
        _kind: ImageKind,
        _data: Bytes,
    ) -> Result<UploadToken, GPhotosError> {
        let mut state = self.state();
        state.calls.push(format!("upload:{file_name}"));
        if state.fail_upload.contains(file_name) {
            return Err(GPhotosError::ApiResponse(500, "upload failed".into()));
        }
        state.next_token_id += 1;
        let token = UploadToken::new(format!("token-{}-{file_name}", state.next_token_id));
        state.uploads.push(file_name.to_string());
        Ok(token)
    }

    async fn link_media_item(
        &self,
        album_id: Option<&str>,
        file_name: &str,
        upload_token: &UploadToken,
    ) -> Result<(), GPhotosError> {
        let mut state = self.state();
        state.calls.push(format!("link:{file_name}"));
        if state.fail_link.contains(file_name) {
            return Err(GPhotosError::ItemNotCreated(13, "link failed".into()));
        }
        state.links.push((
            album_id.map(String::from),
            file_name.to_string(),
            upload_token.as_str().to_string(),
        ));
        Ok(())
    }
}

pub fn album(id: &str, title: &str) -> Album {
    Album {
        id: id.to_string(),
        title: Some(title.to_string()),
        product_url: None,
        is_writeable: Some(true),
        media_items_count: None,
        cover_photo_base_url: None,
        cover_photo_media_item_id: None,
    }
}

pub fn untitled_album(id: &str) -> Album {
    Album {
        title: None,
        ..album(id, "")
    }
}

pub fn page(albums: Vec<Album>, next_page_token: Option<&str>) -> AlbumsPage {
    AlbumsPage {
        albums,
        next_page_token: next_page_token.map(String::from),
    }
}

/// Creates the given files (and their parent directories) under `root`
pub fn write_tree(root: &Path, files: &[&str]) {
    for rel in files {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not really image bytes").unwrap();
    }
}
