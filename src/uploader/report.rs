/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::{GPhotosError, UploadToken};
use std::fmt;
use std::path::PathBuf;
use strum_macros::IntoStaticStr;

/// Summary of a completed uploader run. `uploaded` counts images that were
/// both uploaded and linked; anything that went wrong along the way is kept
/// in `failures`.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub albums_created: u64,
    pub uploaded: u64,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A single recorded failure, attributed to the file and album it happened
/// for. When the link step fails after a successful upload the token is
/// carried here so it is not silently lost.
#[derive(Debug)]
pub struct SyncFailure {
    pub path: PathBuf,
    pub album_title: Option<String>,
    pub stage: FailureStage,
    pub error: GPhotosError,
    pub orphaned_token: Option<UploadToken>,
}

/// The step an individual failure occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum FailureStage {
    Walk,
    Album,
    Read,
    Upload,
    Link,
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage: &'static str = self.stage.into();
        write!(f, "{} failed for {}", stage, self.path.display())?;
        if let Some(album) = &self.album_title {
            write!(f, " (album {album})")?;
        }
        write!(f, ": {}", self.error)?;
        if let Some(token) = &self.orphaned_token {
            write!(f, "; orphaned upload token {token}")?;
        }
        Ok(())
    }
}
