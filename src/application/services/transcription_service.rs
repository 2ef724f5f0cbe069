use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::application::ports::{RepositoryError, TranscriptionRepository};
use crate::domain::{Transcription, TranscriptionId};

use super::transcription_pipeline::{PipelineError, TranscriptionPipeline};

/// How far back the listing endpoint looks.
pub const RECENT_WINDOW_DAYS: i64 = 30;

pub struct TranscriptionService {
    pipeline: Arc<TranscriptionPipeline>,
    repository: Arc<dyn TranscriptionRepository>,
}

impl TranscriptionService {
    pub fn new(
        pipeline: Arc<TranscriptionPipeline>,
        repository: Arc<dyn TranscriptionRepository>,
    ) -> Self {
        Self {
            pipeline,
            repository,
        }
    }

    pub fn stub_mode(&self) -> bool {
        self.pipeline.stub_mode()
    }

    #[tracing::instrument(skip(self, audio_url))]
    pub async fn transcribe_and_save(
        &self,
        audio_url: &str,
        language: &str,
    ) -> Result<Transcription, TranscriptionServiceError> {
        let result = self
            .pipeline
            .transcribe(audio_url, language)
            .await
            .map_err(TranscriptionServiceError::Pipeline)?;

        let source = result.source();
        let record = self
            .repository
            .save(audio_url, result.text(), source)
            .await
            .map_err(TranscriptionServiceError::Repository)?;

        tracing::info!(
            transcription_id = %record.id,
            source = %source,
            chars = record.text.len(),
            "Transcription saved"
        );

        Ok(record)
    }

    pub async fn get(&self, id: TranscriptionId) -> Result<Option<Transcription>, RepositoryError> {
        self.repository.get_by_id(id).await
    }

    pub async fn list_recent(&self) -> Result<Vec<Transcription>, RepositoryError> {
        let cutoff = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
        self.repository.list_since(cutoff).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("pipeline: {0}")]
    Pipeline(PipelineError),
    #[error("repository: {0}")]
    Repository(RepositoryError),
}

impl TranscriptionServiceError {
    pub fn stage(&self) -> &'static str {
        match self {
            TranscriptionServiceError::Pipeline(e) => e.stage(),
            TranscriptionServiceError::Repository(_) => "persist",
        }
    }
}
