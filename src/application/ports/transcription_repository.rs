use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Transcription, TranscriptionId, TranscriptionSource};

use super::RepositoryError;

#[async_trait]
pub trait TranscriptionRepository: Send + Sync {
    async fn save(
        &self,
        audio_url: &str,
        text: &str,
        source: TranscriptionSource,
    ) -> Result<Transcription, RepositoryError>;

    async fn get_by_id(&self, id: TranscriptionId) -> Result<Option<Transcription>, RepositoryError>;

    /// Records created at or after `cutoff`, newest first.
    async fn list_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Transcription>, RepositoryError>;
}
