use std::sync::Arc;

use crate::application::services::TranscriptionService;

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub default_language: String,
}

impl AppState {
    pub fn new(transcription_service: Arc<TranscriptionService>) -> Self {
        Self {
            transcription_service,
            default_language: crate::presentation::handlers::DEFAULT_LANGUAGE.to_string(),
        }
    }
}
