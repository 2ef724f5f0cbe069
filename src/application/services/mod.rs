mod normalizer;
mod recognition_retrier;
mod recognizer_client;
pub mod retry;
mod scratch_files;
mod transcription_pipeline;
mod transcription_service;

pub use normalizer::{AudioNormalizer, NormalizeError, canonical_path_for};
pub use recognition_retrier::RecognitionRetrier;
pub use recognizer_client::{DEFAULT_RECOGNITION_TIMEOUT, RecognizerClient};
pub use retry::{Attempt, Backoff, RetryPolicy, retry_with_backoff};
pub use scratch_files::ScratchFiles;
pub use transcription_pipeline::{PipelineError, TranscriptionPipeline};
pub use transcription_service::{TranscriptionService, TranscriptionServiceError};
