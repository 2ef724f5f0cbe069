use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioTranscoder, TranscodeError};
use crate::domain::CanonicalFormat;

/// Transcodes through an `ffmpeg` child process.
///
/// The binary path is injected; the child is killed if the transcode future
/// is dropped, so an outer timeout actually stops the process.
pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        format: &CanonicalFormat,
    ) -> Result<(), TranscodeError> {
        let channels = format.channels.to_string();
        let sample_rate = format.sample_rate_hz.to_string();

        let result = Command::new(&self.binary)
            .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(input)
            .args(["-ac", channels.as_str()])
            .args(["-ar", sample_rate.as_str()])
            .args(["-acodec", format.codec])
            .args(["-f", format.container])
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| TranscodeError::Spawn(format!("{}: {}", self.binary.display(), e)))?;

        if !result.status.success() {
            return Err(TranscodeError::Failed {
                code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// True when `binary -version` runs successfully.
pub async fn check_ffmpeg_binary(binary: &Path) -> bool {
    Command::new(binary)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}
