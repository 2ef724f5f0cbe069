use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use audioscribe::application::ports::AudioFetcher;
use audioscribe::application::services::{
    AudioNormalizer, RecognitionRetrier, RecognizerClient, RetryPolicy, TranscriptionPipeline,
    TranscriptionService,
};
use audioscribe::infrastructure::audio::{
    FfmpegTranscoder, HttpAudioFetcher, RetryingAudioFetcher, SpeechBackendFactory,
    check_ffmpeg_binary,
};
use audioscribe::infrastructure::observability::{TracingConfig, init_tracing};
use audioscribe::infrastructure::persistence::InMemoryTranscriptionRepository;
use audioscribe::infrastructure::storage::ScratchDir;
use audioscribe::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
        &settings.logging.level,
    ));

    let scratch = ScratchDir::new(&settings.fetch.scratch_dir).with_context(|| {
        format!(
            "Failed to create scratch directory {}",
            settings.fetch.scratch_dir.display()
        )
    })?;

    let http_fetcher: Arc<dyn AudioFetcher> =
        Arc::new(HttpAudioFetcher::new(scratch, settings.fetch.timeout())?);
    let fetcher: Arc<dyn AudioFetcher> = if settings.fetch.attempts > 1 {
        Arc::new(RetryingAudioFetcher::new(
            http_fetcher,
            RetryPolicy::new(settings.fetch.attempts, settings.fetch.initial_delay()),
        ))
    } else {
        http_fetcher
    };

    let transcoder = FfmpegTranscoder::new(&settings.normalizer.ffmpeg_path);
    if !check_ffmpeg_binary(transcoder.binary()).await {
        tracing::warn!(
            ffmpeg = %transcoder.binary().display(),
            "ffmpeg not available, non-WAV inputs will fail to normalize"
        );
    }
    let normalizer = AudioNormalizer::new(Arc::new(transcoder), settings.normalizer.timeout());

    let backend = SpeechBackendFactory::create(&settings.recognition);
    let retrier = RecognitionRetrier::new(
        RecognizerClient::new(backend, settings.recognition.timeout()),
        RetryPolicy::new(
            settings.recognition.attempts,
            settings.recognition.initial_delay(),
        ),
    );

    let pipeline = Arc::new(TranscriptionPipeline::new(fetcher, normalizer, retrier));
    let repository = Arc::new(InMemoryTranscriptionRepository::new());
    let service = Arc::new(TranscriptionService::new(pipeline, repository));

    let router = create_router(AppState::new(service));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(%addr, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
