use std::io;

use async_trait::async_trait;

use crate::domain::AudioResource;

/// Downloads a remote audio resource into a uniquely named scratch file.
///
/// A single attempt; callers decide whether to retry.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<AudioResource, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
    #[error("write failed: {0}")]
    WriteFailed(#[from] io::Error),
}
