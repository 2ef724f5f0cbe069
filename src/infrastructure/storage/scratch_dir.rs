use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Directory shared by concurrent requests for their transient files.
///
/// Names carry a fresh UUID so requests never collide and need no locking.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `extension` includes its leading dot.
    pub fn allocate(&self, extension: &str) -> PathBuf {
        self.root
            .join(format!("audio_{}{}", Uuid::new_v4().simple(), extension))
    }
}
