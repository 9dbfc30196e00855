/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # GPhotos
//!
//! Client library for the Photos Library APIv1 interface, together with a
//! folder-to-album uploader that mirrors a local directory tree into remote
//! albums.
//!
//! ## Features
//!
//! - Album information
//!     - Can list the albums of a library (paginated stream)
//!     - Can create an Album
//! - Media item information
//!     - Can list the media items contained in an Album
//!     - Can upload image bytes and link them into an Album
//! - Folder-to-album uploader ([`uploader::AlbumUploader`])
//!     - Derives album titles from the folder structure under a root
//!     - Deduplicates against the albums that already exist remotely
//!     - Reports per-file failures instead of aborting the whole run
//! - Lower level interface for handling the raw communication
//!
//! *The API uses OAuth2 bearer tokens. Acquiring and refreshing the access
//! token is left up to the consumer of this library.*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! gphotos = "0.4.0"
//! ```
//!
//! ## Usage
//!
//! **You will need an OAuth2 access token with the photos library scopes
//! prior to using the API**
//!
//! ```rust
//! use gphotos::uploader::AlbumUploader;
//! use gphotos::v1::{Album, Client, Creds};
//! use futures::{pin_mut, StreamExt};
//! use std::path::Path;
//!
//! async fn upload_folder_tree(access_token: &str, root: &Path) -> anyhow::Result<()> {
//!     // The access token is obtained via an OAuth2 flow external to this
//!     let client = Client::new(Creds::from_access_token(access_token));
//!
//!     // Mirror the folder tree under `root` into albums
//!     let report = AlbumUploader::new(client).run(root).await?;
//!     println!(
//!         "uploaded {} images into {} new albums",
//!         report.uploaded, report.albums_created
//!     );
//!
//!     // Failures are collected per file rather than aborting the run
//!     for failure in &report.failures {
//!         eprintln!("{failure}");
//!     }
//!     Ok(())
//! }
//!
//! async fn print_albums(client: Client) -> anyhow::Result<()> {
//!     // Iterate over the albums of the library
//!     let albums = Album::list(client, false);
//!     pin_mut!(albums);
//!     while let Some(album) = albums.next().await {
//!         let album = album?;
//!         println!("{} ({})", album.title.as_deref().unwrap_or("<untitled>"), album.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod uploader;
pub mod v1;
