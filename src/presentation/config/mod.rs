mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    FetchSettings, LoggingSettings, NormalizerSettings, RecognitionSettings, ServerSettings,
    Settings, SettingsError,
};
