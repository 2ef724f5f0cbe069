mod audio_resource;
mod canonical_format;
mod normalized_audio;
mod pipeline_stage;
mod recognition_attempt;
mod transcription;
mod transcription_id;
mod transcription_result;
mod transcription_source;

pub use audio_resource::{AudioResource, DEFAULT_EXTENSION, detect_extension};
pub use canonical_format::{CANONICAL_EXTENSION, CanonicalFormat, is_canonical_container};
pub use normalized_audio::NormalizedAudio;
pub use pipeline_stage::PipelineStage;
pub use recognition_attempt::{AttemptOutcome, RecognitionAttempt};
pub use transcription::Transcription;
pub use transcription_id::TranscriptionId;
pub use transcription_result::{STUB_PREFIX, TranscriptionResult};
pub use transcription_source::TranscriptionSource;
