use std::sync::Arc;

use crate::application::ports::{AudioFetcher, FetchError, RecognitionError};
use crate::domain::{PipelineStage, TranscriptionResult};

use super::normalizer::{AudioNormalizer, NormalizeError};
use super::recognition_retrier::RecognitionRetrier;
use super::scratch_files::ScratchFiles;

/// Fetch, normalize, recognize, then clean up, for one audio URL.
///
/// Scratch files are removed on every exit path before the result is
/// returned. Without backend credentials the recognize stage returns a stub.
pub struct TranscriptionPipeline {
    fetcher: Arc<dyn AudioFetcher>,
    normalizer: AudioNormalizer,
    retrier: RecognitionRetrier,
}

impl TranscriptionPipeline {
    pub fn new(
        fetcher: Arc<dyn AudioFetcher>,
        normalizer: AudioNormalizer,
        retrier: RecognitionRetrier,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            retrier,
        }
    }

    pub fn stub_mode(&self) -> bool {
        !self.retrier.is_configured()
    }

    pub async fn transcribe(
        &self,
        audio_url: &str,
        language: &str,
    ) -> Result<TranscriptionResult, PipelineError> {
        let mut scratch = ScratchFiles::new();

        let result = self.run_stages(audio_url, language, &mut scratch).await;

        transition(PipelineStage::Cleanup);
        scratch.cleanup().await;

        match &result {
            Ok(_) => transition(PipelineStage::Done),
            Err(e) => {
                transition(PipelineStage::Failed);
                tracing::debug!(stage = e.stage(), error = %e, "Pipeline failed");
            }
        }

        result
    }

    async fn run_stages(
        &self,
        audio_url: &str,
        language: &str,
        scratch: &mut ScratchFiles,
    ) -> Result<TranscriptionResult, PipelineError> {
        transition(PipelineStage::Fetching);
        let resource = self
            .fetcher
            .fetch(audio_url)
            .await
            .map_err(PipelineError::Fetch)?;
        scratch.track(resource.path());

        transition(PipelineStage::Normalizing);
        let normalized = self
            .normalizer
            .normalize(&resource)
            .await
            .map_err(PipelineError::Normalize)?;
        scratch.track(normalized.path());

        transition(PipelineStage::Recognizing);
        if !self.retrier.is_configured() {
            tracing::info!("Speech backend not configured, returning stubbed transcription");
            return Ok(TranscriptionResult::stub_for(&normalized));
        }

        let text = self
            .retrier
            .recognize(&normalized, language)
            .await
            .map_err(PipelineError::Recognition)?;

        Ok(TranscriptionResult::Recognized(text))
    }
}

fn transition(stage: PipelineStage) {
    tracing::debug!(stage = %stage, "Pipeline stage transition");
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetch: {0}")]
    Fetch(FetchError),
    #[error("normalize: {0}")]
    Normalize(NormalizeError),
    #[error("recognition: {0}")]
    Recognition(RecognitionError),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Normalize(_) => "normalize",
            PipelineError::Recognition(_) => "recognize",
        }
    }
}
