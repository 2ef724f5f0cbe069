use std::time::Duration;

use crate::application::ports::RecognitionError;
use crate::domain::{AttemptOutcome, NormalizedAudio, RecognitionAttempt};

use super::recognizer_client::RecognizerClient;
use super::retry::{RetryPolicy, retry_with_backoff};

/// Drives [`RecognizerClient`] attempts under a [`RetryPolicy`].
///
/// Every failure kind is retried, `NoMatch` included.
pub struct RecognitionRetrier {
    client: RecognizerClient,
    policy: RetryPolicy,
}

impl RecognitionRetrier {
    pub fn new(client: RecognizerClient, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn recognize(
        &self,
        audio: &NormalizedAudio,
        language: &str,
    ) -> Result<String, RecognitionError> {
        let client = &self.client;
        let path = audio.path();

        let result =
            retry_with_backoff("speech_recognition", &self.policy, move |attempt| async move {
                let result = client.recognize_once(path, language).await;
                let record = observe(attempt.number, attempt.delay, &result);
                tracing::debug!(
                    attempt = record.index,
                    delay_ms = record.delay.as_millis() as u64,
                    outcome = %record.outcome,
                    "Recognition attempt finished"
                );
                result
            })
            .await;

        if let Err(e) = &result {
            tracing::warn!(
                kind = e.kind(),
                attempts = self.policy.attempts,
                "Speech recognition gave up"
            );
        }

        result
    }
}

fn observe(
    index: u32,
    delay: Duration,
    result: &Result<String, RecognitionError>,
) -> RecognitionAttempt {
    let outcome = match result {
        Ok(text) => AttemptOutcome::Recognized {
            chars: text.chars().count(),
        },
        Err(RecognitionError::NoMatch) => AttemptOutcome::NoMatch,
        Err(RecognitionError::Canceled { reason, detail }) => AttemptOutcome::Canceled {
            reason: reason.clone(),
            detail: detail.clone(),
        },
        Err(RecognitionError::TimedOut(_)) => AttemptOutcome::TimedOut,
        Err(RecognitionError::NotConfigured) => AttemptOutcome::NotConfigured,
    };
    RecognitionAttempt::new(index, delay, outcome)
}
