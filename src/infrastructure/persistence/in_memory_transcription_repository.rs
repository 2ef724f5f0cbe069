use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{RepositoryError, TranscriptionRepository};
use crate::domain::{Transcription, TranscriptionId, TranscriptionSource};

/// Process-local store used when no external database is wired in.
#[derive(Default)]
pub struct InMemoryTranscriptionRepository {
    records: RwLock<HashMap<TranscriptionId, Transcription>>,
}

impl InMemoryTranscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TranscriptionRepository for InMemoryTranscriptionRepository {
    #[instrument(skip(self, audio_url, text), fields(source = %source))]
    async fn save(
        &self,
        audio_url: &str,
        text: &str,
        source: TranscriptionSource,
    ) -> Result<Transcription, RepositoryError> {
        let record = Transcription::new(audio_url.to_string(), text.to_string(), source);
        self.records.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    #[instrument(skip(self), fields(transcription_id = %id))]
    async fn get_by_id(&self, id: TranscriptionId) -> Result<Option<Transcription>, RepositoryError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Transcription>, RepositoryError> {
        let mut items: Vec<Transcription> = self
            .records
            .read()
            .await
            .values()
            .filter(|record| record.created_at >= cutoff)
            .cloned()
            .collect();

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}
