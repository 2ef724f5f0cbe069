mod audio_fetcher;
mod audio_transcoder;
mod repository_error;
mod speech_backend;
mod transcription_repository;

pub use audio_fetcher::{AudioFetcher, FetchError};
pub use audio_transcoder::{AudioTranscoder, TranscodeError};
pub use repository_error::RepositoryError;
pub use speech_backend::{RecognitionError, RecognitionSession, SpeechBackend};
pub use transcription_repository::TranscriptionRepository;
