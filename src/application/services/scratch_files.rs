use std::io;
use std::path::{Path, PathBuf};

/// Scratch files owned by one pipeline run.
///
/// [`ScratchFiles::cleanup`] removes them on the normal exit path. If the run
/// is cancelled before that, `Drop` removes whatever is left.
#[derive(Debug, Default)]
pub struct ScratchFiles {
    paths: Vec<PathBuf>,
}

impl ScratchFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` once; a path tracked twice is deleted once.
    pub fn track(&mut self, path: &Path) {
        if !self.paths.iter().any(|p| p == path) {
            self.paths.push(path.to_path_buf());
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Best-effort removal. Errors are logged and never returned.
    pub async fn cleanup(&mut self) {
        for path in self.paths.drain(..) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::debug!(path = %path.display(), "Removed scratch file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "Failed to remove scratch file")
                }
            }
        }
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        for path in self.paths.drain(..) {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(error = %e, path = %path.display(), "Failed to remove scratch file on drop");
                }
            }
        }
    }
}
