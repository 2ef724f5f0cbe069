use std::sync::Arc;

use crate::application::ports::SpeechBackend;
use crate::presentation::config::RecognitionSettings;

use super::azure_speech_backend::AzureSpeechBackend;
use super::unconfigured_speech_backend::UnconfiguredSpeechBackend;

pub struct SpeechBackendFactory;

impl SpeechBackendFactory {
    pub fn create(settings: &RecognitionSettings) -> Arc<dyn SpeechBackend> {
        match settings.credentials() {
            Some((key, region)) => {
                let backend = match settings.endpoint.as_deref() {
                    Some(endpoint) if !endpoint.trim().is_empty() => {
                        AzureSpeechBackend::with_endpoint(key, endpoint)
                    }
                    _ => AzureSpeechBackend::new(key, region),
                };
                tracing::info!(region = %region, "Azure speech backend configured");
                Arc::new(backend)
            }
            None => {
                tracing::warn!("Azure speech credentials missing, transcriptions will be stubbed");
                Arc::new(UnconfiguredSpeechBackend)
            }
        }
    }
}
