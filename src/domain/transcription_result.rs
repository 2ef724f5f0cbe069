use super::{NormalizedAudio, TranscriptionSource};

pub const STUB_PREFIX: &str = "Stubbed transcription for ";

/// Output of one pipeline run, before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionResult {
    Recognized(String),
    Stubbed(String),
}

impl TranscriptionResult {
    /// Placeholder returned when no speech backend is configured.
    pub fn stub_for(audio: &NormalizedAudio) -> Self {
        Self::Stubbed(format!("{}{}", STUB_PREFIX, audio.file_name()))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Recognized(text) | Self::Stubbed(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Recognized(text) | Self::Stubbed(text) => text,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Self::Stubbed(_))
    }

    pub fn source(&self) -> TranscriptionSource {
        match self {
            Self::Recognized(_) => TranscriptionSource::Azure,
            Self::Stubbed(_) => TranscriptionSource::Stub,
        }
    }
}
