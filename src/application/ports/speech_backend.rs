use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

/// Opaque speech-recognition capability.
///
/// Work happens inside a [`RecognitionSession`]; whoever opens a session must
/// call [`RecognitionSession::close`] on every exit path.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// False when credentials are absent; callers fall back to stub mode.
    fn configured(&self) -> bool;

    async fn open_session(
        &self,
        language: &str,
    ) -> Result<Box<dyn RecognitionSession>, RecognitionError>;
}

#[async_trait]
pub trait RecognitionSession: Send {
    async fn recognize_once(&mut self, audio_path: &Path) -> Result<String, RecognitionError>;

    /// Releases backend-side resources. Must be idempotent and must not block.
    fn close(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error("speech backend credentials missing")]
    NotConfigured,
    #[error("no speech could be recognized")]
    NoMatch,
    #[error("canceled: {reason} | {detail}")]
    Canceled { reason: String, detail: String },
    #[error("recognition timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
}

impl RecognitionError {
    pub fn canceled(reason: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Canceled {
            reason: reason.into(),
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RecognitionError::NotConfigured => "not_configured",
            RecognitionError::NoMatch => "no_match",
            RecognitionError::Canceled { .. } => "canceled",
            RecognitionError::TimedOut(_) => "timeout",
        }
    }
}
