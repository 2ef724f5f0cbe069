use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::CanonicalFormat;

#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Writes `input` re-encoded as `format` to `output`.
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        format: &CanonicalFormat,
    ) -> Result<(), TranscodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("failed to start transcoder: {0}")]
    Spawn(String),
    #[error("transcoder exited with {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
