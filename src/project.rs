//! Per-request working storage.
//!
//! A `ConversionProject` owns a unique directory under the storage root that
//! holds the uploaded document and whatever the engine writes next to it. The
//! directory is removed by `release`, or by `Drop` if the request is abandoned
//! before reaching its cleanup step.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{debug, warn};

/// Name used when the client supplies no usable filename.
const FALLBACK_FILENAME: &str = "upload";

/// Working resources of one conversion request.
#[derive(Debug)]
pub struct ConversionProject {
    workspace: Option<TempDir>,
    file: PathBuf,
}

impl ConversionProject {
    /// Materialize `content` into a fresh project directory.
    ///
    /// The stream is consumed fully. If anything fails, the partially written
    /// directory is removed before the error is returned.
    pub async fn open<R>(storage_root: &Path, filename: &str, content: &mut R) -> Result<Self>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let name = sanitize_filename(filename);

        tokio::fs::create_dir_all(storage_root)
            .await
            .with_context(|| {
                format!(
                    "Failed to create storage directory {}",
                    storage_root.display()
                )
            })?;

        let workspace = tempfile::Builder::new()
            .prefix("project-")
            .tempdir_in(storage_root)
            .context("Failed to create project directory")?;

        let file = workspace.path().join(&name);
        let mut out = tokio::fs::File::create(&file)
            .await
            .with_context(|| format!("Failed to create {}", file.display()))?;

        let size = tokio::io::copy(content, &mut out)
            .await
            .context("Failed to store uploaded file")?;
        out.flush()
            .await
            .context("Failed to store uploaded file")?;

        debug!(
            "Opened project {} ({} bytes)",
            workspace.path().display(),
            size
        );

        Ok(Self {
            workspace: Some(workspace),
            file,
        })
    }

    /// The materialized input file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn is_released(&self) -> bool {
        self.workspace.is_none()
    }

    /// Remove the project directory. Calling this again is a no-op.
    ///
    /// Removal failures are logged, never returned.
    pub fn release(&mut self) {
        let Some(workspace) = self.workspace.take() else {
            return;
        };

        let path = workspace.path().to_path_buf();
        match workspace.close() {
            Ok(()) => debug!("Released project {}", path.display()),
            Err(e) => warn!("Failed to remove project {}: {}", path.display(), e),
        }
    }
}

impl Drop for ConversionProject {
    fn drop(&mut self) {
        self.release();
    }
}

/// Reduce a client-supplied filename to its base name.
///
/// Everything up to the last `/` or `\` is discarded, so `../../etc/passwd`
/// becomes `passwd`. Control characters are removed. Names that end up empty,
/// `.` or `..` are replaced by a fixed fallback.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    match cleaned {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        name => name.to_string(),
    }
}
