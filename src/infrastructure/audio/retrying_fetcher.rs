use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{AudioFetcher, FetchError};
use crate::application::services::{RetryPolicy, retry_with_backoff};
use crate::domain::AudioResource;

/// Retries an inner fetcher with the shared backoff policy.
pub struct RetryingAudioFetcher {
    inner: Arc<dyn AudioFetcher>,
    policy: RetryPolicy,
}

impl RetryingAudioFetcher {
    pub fn new(inner: Arc<dyn AudioFetcher>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl AudioFetcher for RetryingAudioFetcher {
    async fn fetch(&self, url: &str) -> Result<AudioResource, FetchError> {
        let inner = &self.inner;
        retry_with_backoff("audio_download", &self.policy, move |_| inner.fetch(url)).await
    }
}
