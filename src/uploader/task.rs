/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::uploader::report::{FailureStage, SyncFailure, SyncReport};
use crate::uploader::scan::{UploadJob, file_name_of, scan_folder};
use crate::uploader::service::PhotosLibrary;
use crate::v1::{Album, GPhotosError, UploadToken};
use bytes::Bytes;
use log::{debug, error, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// One-shot synchronization of a local folder tree into remote albums.
///
/// The uploader first loads every existing album into a title-keyed index,
/// then walks the tree and, per image, resolves or lazily creates the album
/// derived from the containing folder, uploads the bytes and links the
/// result into the album. The index is the single source of truth for
/// whether an album title already exists, so a title is created at most once
/// per run.
///
/// Remote calls are issued one at a time; each image is processed
/// independently and its failures are recorded in the report rather than
/// aborting the run. Only a failed album-index bootstrap or an unreadable
/// root folder end the run early.
pub struct AlbumUploader<S> {
    service: S,
    albums_by_title: HashMap<String, Album>,
    report: SyncReport,
}

impl<S: PhotosLibrary> AlbumUploader<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            albums_by_title: HashMap::new(),
            report: SyncReport::default(),
        }
    }

    /// Runs the synchronization for the tree under `root` and returns the
    /// report of what happened.
    pub async fn run(mut self, root: &Path) -> Result<SyncReport, GPhotosError> {
        self.fetch_existing_albums().await?;

        let scan = scan_folder(root)?;
        if !scan.failures.is_empty() {
            warn!("{} entries could not be read during the scan", scan.failures.len());
        }
        self.report.failures.extend(scan.failures);

        for job in &scan.jobs {
            self.process_image(job).await;
        }

        info!(
            "finished: {} images uploaded, {} albums created, {} failures",
            self.report.uploaded,
            self.report.albums_created,
            self.report.failures.len()
        );
        Ok(self.report)
    }

    // Pages through the album listing and fills the title index. Keeps the
    // set of consumed page tokens and stops as soon as the service hands out
    // a token it already served, so a cyclic token sequence cannot loop the
    // bootstrap forever.
    async fn fetch_existing_albums(&mut self) -> Result<(), GPhotosError> {
        let mut known_page_tokens = HashSet::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self
                .service
                .list_albums_page(false, page_token.as_deref())
                .await?;
            debug!(
                "album page: {} albums, next page token: {:?}",
                page.albums.len(),
                page.next_page_token
            );
            for album in page.albums {
                let Some(title) = album.title.clone() else {
                    debug!("skipping untitled album {}", album.id);
                    continue;
                };
                if let Some(previous) = self.albums_by_title.insert(title, album) {
                    debug!("duplicate album title, replacing album {}", previous.id);
                }
            }
            let Some(next) = page.next_page_token else {
                break;
            };
            if !known_page_tokens.insert(next.clone()) {
                warn!("album listing repeated a page token, stopping the bootstrap early");
                break;
            }
            page_token = Some(next);
        }
        info!("found {} existing albums", self.albums_by_title.len());
        Ok(())
    }

    // Looks the title up in the index, creating the album remotely on a miss.
    async fn resolve_album(&mut self, title: &str) -> Result<Album, GPhotosError> {
        if let Some(album) = self.albums_by_title.get(title) {
            return Ok(album.clone());
        }
        info!("creating album: {title}");
        let album = self.service.create_album(title).await?;
        self.report.albums_created += 1;
        self.albums_by_title.insert(title.to_string(), album.clone());
        Ok(album)
    }

    // Uploads one image and links it into its album. Every failure is
    // attributed to the file and recorded; processing then moves on to the
    // next image.
    async fn process_image(&mut self, job: &UploadJob) {
        let album_label = job.album_title.as_deref().unwrap_or("<library>");

        let album_id = match &job.album_title {
            Some(title) => match self.resolve_album(title).await {
                Ok(album) => Some(album.id),
                Err(error) => {
                    error!(
                        "could not resolve album {title} for {}: {error}",
                        job.path.display()
                    );
                    self.record(job, FailureStage::Album, error, None);
                    return;
                }
            },
            None => None,
        };

        // The file handle lives only for the duration of the read
        let data = match tokio::fs::read(&job.path).await {
            Ok(data) => Bytes::from(data),
            Err(error) => {
                error!("could not read {}: {error}", job.path.display());
                self.record(job, FailureStage::Read, error.into(), None);
                return;
            }
        };

        let file_name = file_name_of(&job.path);
        let token = match self.service.upload_bytes(&file_name, job.kind, data).await {
            Ok(token) => token,
            Err(error) => {
                error!("error uploading image: {album_label}  image: {file_name}: {error}");
                self.record(job, FailureStage::Upload, error, None);
                return;
            }
        };
        info!("uploaded image: {}", job.path.display());

        match self
            .service
            .link_media_item(album_id.as_deref(), &file_name, &token)
            .await
        {
            Ok(()) => {
                self.report.uploaded += 1;
                info!("added to album: {album_label}  image: {file_name}");
            }
            Err(error) => {
                error!(
                    "linking failed for {file_name} (album {album_label}): {error}; \
                     upload token {token} is orphaned"
                );
                self.record(job, FailureStage::Link, error, Some(token));
            }
        }
    }

    fn record(
        &mut self,
        job: &UploadJob,
        stage: FailureStage,
        error: GPhotosError,
        orphaned_token: Option<UploadToken>,
    ) {
        self.report.failures.push(SyncFailure {
            path: job.path.clone(),
            album_title: job.album_title.clone(),
            stage,
            error,
            orphaned_token,
        });
    }
}
