use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;

use crate::application::ports::{RecognitionError, RecognitionSession, SpeechBackend};

pub const WAV_CONTENT_TYPE: &str = "audio/wav; codecs=audio/pcm; samplerate=16000";
const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";

/// Azure Speech short-audio REST recognition.
pub struct AzureSpeechBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    open_sessions: Arc<AtomicUsize>,
}

impl AzureSpeechBackend {
    pub fn new(api_key: &str, region: &str) -> Self {
        Self::with_endpoint(api_key, &format!("https://{}.stt.speech.microsoft.com", region))
    }

    pub fn with_endpoint(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), RECOGNITION_PATH),
            api_key: api_key.to_string(),
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sessions opened and not yet closed.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechBackend for AzureSpeechBackend {
    fn configured(&self) -> bool {
        true
    }

    async fn open_session(
        &self,
        language: &str,
    ) -> Result<Box<dyn RecognitionSession>, RecognitionError> {
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(AzureSpeechSession {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            language: language.to_string(),
            open_sessions: Arc::clone(&self.open_sessions),
            closed: false,
        }))
    }
}

struct AzureSpeechSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
    open_sessions: Arc<AtomicUsize>,
    closed: bool,
}

#[async_trait]
impl RecognitionSession for AzureSpeechSession {
    async fn recognize_once(&mut self, audio_path: &Path) -> Result<String, RecognitionError> {
        let audio = tokio::fs::read(audio_path)
            .await
            .map_err(|e| RecognitionError::canceled("AudioRead", e.to_string()))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            language = %self.language,
            bytes = audio.len(),
            "Sending audio to Azure Speech"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("language", self.language.as_str()), ("format", "simple")])
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header(CONTENT_TYPE, WAV_CONTENT_TYPE)
            .header(ACCEPT, "application/json")
            .body(audio)
            .send()
            .await
            .map_err(|e| RecognitionError::canceled("Error", format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RecognitionError::canceled(
                "Error",
                format!("status {}: {}", status, body),
            ));
        }

        let result: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| RecognitionError::canceled("Error", format!("parse response: {}", e)))?;

        map_recognition_response(result)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.open_sessions.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecognitionResponse {
    #[serde(rename = "RecognitionStatus")]
    pub recognition_status: String,
    #[serde(rename = "DisplayText", default)]
    pub display_text: Option<String>,
}

pub fn map_recognition_response(response: RecognitionResponse) -> Result<String, RecognitionError> {
    match response.recognition_status.as_str() {
        "Success" => {
            let text = response.display_text.unwrap_or_default().trim().to_string();
            tracing::info!(chars = text.len(), "Azure Speech recognition completed");
            Ok(text)
        }
        "NoMatch" | "InitialSilenceTimeout" => Err(RecognitionError::NoMatch),
        other => Err(RecognitionError::canceled(
            other,
            response.display_text.unwrap_or_default(),
        )),
    }
}
