//! Per-request scratch storage
//!
//! The remote client uploads from file paths, so every accepted input is
//! written to disk for the duration of one request. All files of a
//! request live in one private directory that is removed when the
//! [`Scratch`] is closed or dropped, whichever path the request took.

use crate::error::Result;
use crate::form::UploadedFile;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DIR_PREFIX: &str = "pdf-toolbox-";
const FALLBACK_NAME: &str = "upload";

/// An input file persisted for the remote client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempArtifact {
    /// Location on disk
    pub path: PathBuf,
    /// Name to present to the remote service
    pub file_name: String,
}

/// Scratch directory owned by a single request
#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
    written: usize,
}

impl Scratch {
    /// Create a fresh directory under `root`
    pub fn new_in(root: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(DIR_PREFIX).tempdir_in(root)?;
        Ok(Self { dir, written: 0 })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Persist one upload as `<ordinal>-<name>`.
    ///
    /// The ordinal keeps same-named uploads of one request apart.
    pub async fn write(&mut self, file: &UploadedFile) -> Result<TempArtifact> {
        self.written += 1;
        let file_name = if file.name.is_empty() {
            FALLBACK_NAME
        } else {
            file.name.as_str()
        };
        let path = self.dir.path().join(format!("{}-{}", self.written, file_name));

        tokio::fs::write(&path, &file.data).await?;
        tracing::debug!(path = %path.display(), bytes = file.data.len(), "wrote temp artifact");

        Ok(TempArtifact {
            path,
            file_name: file_name.to_string(),
        })
    }

    /// Remove the directory and everything in it.
    ///
    /// Failures are logged and otherwise ignored so they never replace the
    /// request's own outcome.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove scratch directory");
        }
    }
}
