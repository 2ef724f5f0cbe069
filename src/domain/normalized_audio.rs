use std::path::{Path, PathBuf};

/// Scratch audio guaranteed to be in the canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAudio {
    path: PathBuf,
    converted: bool,
}

impl NormalizedAudio {
    /// The fetched file was already canonical and is reused as-is.
    pub fn passthrough(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            converted: false,
        }
    }

    /// A new file produced by transcoding.
    pub fn converted(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            converted: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn was_converted(&self) -> bool {
        self.converted
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
