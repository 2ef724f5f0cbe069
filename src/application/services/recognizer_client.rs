use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{RecognitionError, RecognitionSession, SpeechBackend};

pub const DEFAULT_RECOGNITION_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Single bounded call to the speech backend. No retries here.
pub struct RecognizerClient {
    backend: Arc<dyn SpeechBackend>,
    timeout: Duration,
}

impl RecognizerClient {
    pub fn new(backend: Arc<dyn SpeechBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.configured()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn recognize_once(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<String, RecognitionError> {
        if !self.backend.configured() {
            return Err(RecognitionError::NotConfigured);
        }

        // The guard lives inside the timed future: a timeout drops it and
        // closes the session even though the backend call is abandoned.
        let recognition = async {
            let mut session = SessionGuard(self.backend.open_session(language).await?);
            session.0.recognize_once(audio_path).await
        };

        match tokio::time::timeout(self.timeout, recognition).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Speech recognition abandoned after timeout"
                );
                Err(RecognitionError::TimedOut(self.timeout))
            }
        }
    }
}

struct SessionGuard(Box<dyn RecognitionSession>);

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.0.close();
    }
}
