use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AudioTranscoder, TranscodeError};
use crate::domain::{
    AudioResource, CANONICAL_EXTENSION, CanonicalFormat, NormalizedAudio, is_canonical_container,
};

/// Converts fetched audio to the canonical encoding, skipping files that
/// already use the canonical container.
pub struct AudioNormalizer {
    transcoder: Arc<dyn AudioTranscoder>,
    format: CanonicalFormat,
    timeout: Option<Duration>,
}

impl AudioNormalizer {
    pub fn new(transcoder: Arc<dyn AudioTranscoder>, timeout: Option<Duration>) -> Self {
        Self {
            transcoder,
            format: CanonicalFormat::PCM16_MONO_16K,
            timeout,
        }
    }

    pub async fn normalize(&self, resource: &AudioResource) -> Result<NormalizedAudio, NormalizeError> {
        let input = resource.path();

        if is_canonical_container(input) {
            tracing::debug!(path = %input.display(), "Input already canonical, skipping conversion");
            return Ok(NormalizedAudio::passthrough(input));
        }

        let output = canonical_path_for(input);
        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            "Transcoding to 16kHz mono PCM"
        );

        let result = self.run_transcoder(input, &output).await;

        if let Err(e) = &result {
            // A failed or abandoned transcode may leave a partial file behind.
            if let Err(rm_err) = tokio::fs::remove_file(&output).await {
                if rm_err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        error = %rm_err,
                        path = %output.display(),
                        "Failed to remove partial transcoder output"
                    );
                }
            }
            tracing::debug!(error = %e, "Normalization failed");
        }

        result.map(|_| NormalizedAudio::converted(output))
    }

    async fn run_transcoder(&self, input: &Path, output: &Path) -> Result<(), NormalizeError> {
        let transcode = self.transcoder.transcode(input, output, &self.format);

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, transcode)
                .await
                .map_err(|_| NormalizeError::TimedOut(limit))?
                .map_err(NormalizeError::Transcode),
            None => transcode.await.map_err(NormalizeError::Transcode),
        }
    }
}

/// Same directory and stem as `input`, canonical extension.
pub fn canonical_path_for(input: &Path) -> PathBuf {
    input.with_extension(CANONICAL_EXTENSION)
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("transcoding failed: {0}")]
    Transcode(TranscodeError),
    #[error("transcoding timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
}
