use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{AudioFetcher, FetchError};
use crate::domain::{AudioResource, detect_extension};
use crate::infrastructure::observability::redact_url;
use crate::infrastructure::storage::ScratchDir;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Streams audio over HTTP(S) into the scratch directory.
pub struct HttpAudioFetcher {
    client: reqwest::Client,
    scratch: ScratchDir,
}

impl HttpAudioFetcher {
    /// `timeout` bounds connecting and each wait for body bytes, not the
    /// whole transfer.
    pub fn new(scratch: ScratchDir, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| FetchError::RequestFailed(format!("client: {}", e)))?;
        Ok(Self { client, scratch })
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    #[tracing::instrument(skip(self, url), fields(url = %redact_url(url)))]
    async fn fetch(&self, url: &str) -> Result<AudioResource, FetchError> {
        reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", redact_url(url), e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: response.status().as_u16(),
                url: redact_url(url),
            });
        }

        let extension = detect_extension(url);
        let path = self.scratch.allocate(&extension);

        let bytes = match write_body(response, &path).await {
            Ok(n) => n,
            Err(e) => {
                if let Err(rm_err) = tokio::fs::remove_file(&path).await {
                    tracing::debug!(error = %rm_err, path = %path.display(), "No partial download to remove");
                }
                return Err(e);
            }
        };

        tracing::debug!(bytes, path = %path.display(), "Audio downloaded");

        Ok(AudioResource::new(url, extension, path))
    }
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<u64, FetchError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut total: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| FetchError::RequestFailed(e.without_url().to_string()))?;
        file.write_all(&chunk).await?;
        total += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(total)
}
