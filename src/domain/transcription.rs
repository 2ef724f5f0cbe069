use chrono::{DateTime, Utc};

use super::{TranscriptionId, TranscriptionSource};

/// Persisted record of a finished transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub id: TranscriptionId,
    pub audio_url: String,
    pub text: String,
    pub source: TranscriptionSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transcription {
    pub fn new(audio_url: String, text: String, source: TranscriptionSource) -> Self {
        let now = Utc::now();
        Self {
            id: TranscriptionId::new(),
            audio_url,
            text,
            source,
            created_at: now,
            updated_at: now,
        }
    }
}
