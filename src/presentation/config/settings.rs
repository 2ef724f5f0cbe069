use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::Deserialize;

use crate::application::services::DEFAULT_RECOGNITION_TIMEOUT;
use crate::application::services::retry::{DEFAULT_ATTEMPTS, DEFAULT_INITIAL_DELAY};
use crate::infrastructure::audio::DEFAULT_FETCH_TIMEOUT;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub recognition: RecognitionSettings,
    pub fetch: FetchSettings,
    pub normalizer: NormalizerSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionSettings {
    #[serde(default)]
    pub azure_key: Option<String>,
    #[serde(default)]
    pub azure_region: Option<String>,
    /// Overrides the regional Azure endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,
    pub attempts: u32,
    pub initial_delay_ms: u64,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    pub timeout_ms: u64,
    pub attempts: u32,
    pub initial_delay_ms: u64,
    pub scratch_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerSettings {
    pub ffmpeg_path: PathBuf,
    /// Zero disables the bound.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

impl Settings {
    /// Defaults, then `appsettings.{env}`, then `APP__*` variables, then the
    /// legacy `AZURE_KEY` / `AZURE_REGION` / `PORT` variables.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let builder = Self::default_builder()?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("recognition.azure_key", non_blank_var("AZURE_KEY"))?
            .set_override_option("recognition.azure_region", non_blank_var("AZURE_REGION"))?
            .set_override_option(
                "server.port",
                non_blank_var("PORT").and_then(|p| p.parse::<i64>().ok()),
            )?;

        Self::from_builder(builder)
    }

    /// Built-in defaults only; the base every other source layers onto.
    pub fn default_builder() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        let scratch_dir = std::env::temp_dir().join("audioscribe");

        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4000_i64)?
            .set_default("recognition.attempts", i64::from(DEFAULT_ATTEMPTS))?
            .set_default("recognition.initial_delay_ms", millis(DEFAULT_INITIAL_DELAY))?
            .set_default("recognition.timeout_ms", millis(DEFAULT_RECOGNITION_TIMEOUT))?
            .set_default("fetch.timeout_ms", millis(DEFAULT_FETCH_TIMEOUT))?
            .set_default("fetch.attempts", 1_i64)?
            .set_default("fetch.initial_delay_ms", 200_i64)?
            .set_default("fetch.scratch_dir", scratch_dir.to_string_lossy().into_owned())?
            .set_default("normalizer.ffmpeg_path", "ffmpeg")?
            .set_default("normalizer.timeout_ms", 60_000_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.recognition.attempts == 0 {
            return Err(SettingsError::Invalid(
                "recognition.attempts must be at least 1".into(),
            ));
        }
        if self.recognition.timeout_ms == 0 {
            return Err(SettingsError::Invalid(
                "recognition.timeout_ms must be positive".into(),
            ));
        }
        if self.fetch.attempts == 0 {
            return Err(SettingsError::Invalid(
                "fetch.attempts must be at least 1".into(),
            ));
        }
        if self.fetch.timeout_ms == 0 {
            return Err(SettingsError::Invalid(
                "fetch.timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl RecognitionSettings {
    /// Key and region, only when both are non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.azure_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        let region = self
            .azure_region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())?;
        Some((key, region))
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}

impl NormalizerSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

fn millis(duration: Duration) -> i64 {
    duration.as_millis() as i64
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
