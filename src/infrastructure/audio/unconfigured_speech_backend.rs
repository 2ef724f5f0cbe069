use async_trait::async_trait;

use crate::application::ports::{RecognitionError, RecognitionSession, SpeechBackend};

/// Stands in when no credentials are configured; selects stub mode.
pub struct UnconfiguredSpeechBackend;

#[async_trait]
impl SpeechBackend for UnconfiguredSpeechBackend {
    fn configured(&self) -> bool {
        false
    }

    async fn open_session(
        &self,
        _language: &str,
    ) -> Result<Box<dyn RecognitionSession>, RecognitionError> {
        Err(RecognitionError::NotConfigured)
    }
}
