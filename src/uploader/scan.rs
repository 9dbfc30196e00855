/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::uploader::report::{FailureStage, SyncFailure};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum_macros::EnumString;

/// Image formats recognized by the uploader, matched case-insensitively on
/// the file extension. Everything else is skipped by the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ImageKind {
    #[strum(serialize = "png")]
    Png,

    #[strum(serialize = "gif")]
    Gif,

    #[strum(serialize = "jpeg", serialize = "jpg")]
    Jpeg,
}

impl ImageKind {
    /// Classifies a file by its extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        Self::from_str(extension).ok()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// One image discovered by the scan, paired with the album title derived
/// from its containing folder. Images directly under the root carry no title.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub path: PathBuf,
    pub album_title: Option<String>,
    pub kind: ImageKind,
}

/// Outcome of scanning a folder tree
#[derive(Debug, Default)]
pub struct FolderScan {
    pub jobs: Vec<UploadJob>,
    pub failures: Vec<SyncFailure>,
}

/// Walks the tree under `root` depth-first and collects an upload job for
/// every recognized image file.
///
/// The album title of a folder is the hyphen-joined sequence of directory
/// names from the root down to it; the root itself derives no title. A root
/// that cannot be read is an error; unreadable subdirectories or entries are
/// recorded as failures and the scan continues. Symlinks and other special
/// entries are ignored.
pub fn scan_folder(root: &Path) -> Result<FolderScan, io::Error> {
    let mut scan = FolderScan::default();
    let root_entries = fs::read_dir(root)?;
    let mut pending = vec![(root.to_path_buf(), root_entries, None::<String>)];

    while let Some((dir, entries, album_title)) = pending.pop() {
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    scan.failures.push(SyncFailure {
                        path: dir.clone(),
                        album_title: album_title.clone(),
                        stage: FailureStage::Walk,
                        error: error.into(),
                        orphaned_token: None,
                    });
                    continue;
                }
            };
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(error) => {
                    scan.failures.push(SyncFailure {
                        path,
                        album_title: album_title.clone(),
                        stage: FailureStage::Walk,
                        error: error.into(),
                        orphaned_token: None,
                    });
                    continue;
                }
            };
            if file_type.is_dir() {
                let child_title = Some(child_album_title(album_title.as_deref(), &path));
                match fs::read_dir(&path) {
                    Ok(children) => pending.push((path, children, child_title)),
                    Err(error) => scan.failures.push(SyncFailure {
                        path,
                        album_title: child_title,
                        stage: FailureStage::Walk,
                        error: error.into(),
                        orphaned_token: None,
                    }),
                }
            } else if file_type.is_file() {
                if let Some(kind) = ImageKind::from_path(&path) {
                    scan.jobs.push(UploadJob {
                        path,
                        album_title: album_title.clone(),
                        kind,
                    });
                }
            }
        }
    }

    Ok(scan)
}

// Appends a directory name to the accumulated album title prefix
fn child_album_title(prefix: Option<&str>, dir: &Path) -> String {
    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match prefix {
        Some(prefix) => format!("{prefix}-{name}"),
        None => name,
    }
}

// Best-effort display name for report and creation payloads
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
