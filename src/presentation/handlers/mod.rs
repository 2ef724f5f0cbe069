mod health;
mod transcription;
mod transcriptions;

pub use health::health_handler;
pub use transcription::{DEFAULT_LANGUAGE, azure_transcription_handler};
pub use transcriptions::{get_transcription_handler, list_transcriptions_handler};

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
