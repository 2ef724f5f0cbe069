mod azure_speech_backend;
mod ffmpeg_transcoder;
mod http_audio_fetcher;
mod retrying_fetcher;
mod speech_backend_factory;
mod unconfigured_speech_backend;

pub use azure_speech_backend::{
    AzureSpeechBackend, RecognitionResponse, WAV_CONTENT_TYPE, map_recognition_response,
};
pub use ffmpeg_transcoder::{FfmpegTranscoder, check_ffmpeg_binary};
pub use http_audio_fetcher::{DEFAULT_FETCH_TIMEOUT, HttpAudioFetcher};
pub use retrying_fetcher::RetryingAudioFetcher;
pub use speech_backend_factory::SpeechBackendFactory;
pub use unconfigured_speech_backend::UnconfiguredSpeechBackend;
