#[path = "../../../helpers/mod.rs"]
mod helpers;

use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::StatusCode;
use axum::routing::get;
use futures::StreamExt;

use audioscribe::application::ports::{AudioFetcher, FetchError};
use audioscribe::infrastructure::audio::HttpAudioFetcher;
use audioscribe::infrastructure::storage::ScratchDir;

use helpers::fakes::scratch_entries;
use helpers::mock_server::start_mock_server;

const MP3_BYTES: &[u8] = b"ID3\x04\x00fake-mp3-frames";

fn audio_router() -> Router {
    Router::new()
        .route("/audio/clip.mp3", get(|| async { MP3_BYTES }))
        .route("/audio/stream", get(|| async { b"RIFF....WAVE".as_slice() }))
        .route(
            "/audio/broken.mp3",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/audio/slow.mp3",
            get(|| async {
                let chunks = futures::stream::iter(0..8u8).then(|i| async move {
                    tokio::time::sleep(Duration::from_millis(150)).await;
                    Ok::<_, std::io::Error>(Bytes::from(vec![i; 64]))
                });
                Body::from_stream(chunks)
            }),
        )
        .route(
            "/audio/stalls.mp3",
            get(|| async {
                let head = futures::stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from_static(
                    b"ID3partial",
                ))]);
                Body::from_stream(head.chain(futures::stream::pending()))
            }),
        )
}

fn fetcher(dir: &std::path::Path, timeout: Duration) -> HttpAudioFetcher {
    HttpAudioFetcher::new(ScratchDir::new(dir).unwrap(), timeout).unwrap()
}

#[tokio::test]
async fn given_mp3_url_when_fetching_then_body_lands_in_scratch_with_mp3_extension() {
    let (base_url, _shutdown) = start_mock_server(audio_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), Duration::from_secs(5));
    let url = format!("{}/audio/clip.mp3", base_url);

    let resource = fetcher.fetch(&url).await.unwrap();

    assert_eq!(resource.extension, ".mp3");
    assert_eq!(resource.source_url, url);
    assert!(resource.path().starts_with(dir.path()));
    let name = resource.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("audio_") && name.ends_with(".mp3"), "{}", name);
    assert_eq!(std::fs::read(resource.path()).unwrap(), MP3_BYTES);
}

#[tokio::test]
async fn given_signed_url_when_fetching_then_query_does_not_affect_extension() {
    let (base_url, _shutdown) = start_mock_server(audio_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), Duration::from_secs(5));

    let resource = fetcher
        .fetch(&format!("{}/audio/clip.mp3?sv=2024&sig=abc.def", base_url))
        .await
        .unwrap();

    assert_eq!(resource.extension, ".mp3");
}

#[tokio::test]
async fn given_url_without_extension_when_fetching_then_defaults_to_wav() {
    let (base_url, _shutdown) = start_mock_server(audio_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), Duration::from_secs(5));

    let resource = fetcher
        .fetch(&format!("{}/audio/stream", base_url))
        .await
        .unwrap();

    assert_eq!(resource.extension, ".wav");
    assert!(resource.path().to_string_lossy().ends_with(".wav"));
}

#[tokio::test]
async fn given_missing_resource_when_fetching_then_unexpected_status_and_no_file() {
    let (base_url, _shutdown) = start_mock_server(audio_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), Duration::from_secs(5));

    let result = fetcher
        .fetch(&format!("{}/audio/missing.mp3?token=secret", base_url))
        .await;

    match result {
        Err(FetchError::UnexpectedStatus { status, url }) => {
            assert_eq!(status, 404);
            assert!(!url.contains("secret"), "query must be redacted: {}", url);
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
    assert_eq!(scratch_entries(dir.path()), 0);
}

#[tokio::test]
async fn given_server_error_when_fetching_then_status_is_reported() {
    let (base_url, _shutdown) = start_mock_server(audio_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), Duration::from_secs(5));

    let result = fetcher.fetch(&format!("{}/audio/broken.mp3", base_url)).await;

    assert!(matches!(result, Err(FetchError::UnexpectedStatus { status: 500, .. })));
    assert_eq!(scratch_entries(dir.path()), 0);
}

#[tokio::test]
async fn given_body_stalls_when_fetching_then_times_out_and_removes_partial_file() {
    let (base_url, _shutdown) = start_mock_server(audio_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), Duration::from_millis(300));

    let result = fetcher.fetch(&format!("{}/audio/stalls.mp3", base_url)).await;

    assert!(matches!(result, Err(FetchError::RequestFailed(_))), "{:?}", result);
    assert_eq!(scratch_entries(dir.path()), 0);
}

#[tokio::test]
async fn given_steady_download_longer_than_timeout_when_fetching_then_completes() {
    let (base_url, _shutdown) = start_mock_server(audio_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), Duration::from_millis(500));

    let started = std::time::Instant::now();
    let resource = fetcher
        .fetch(&format!("{}/audio/slow.mp3", base_url))
        .await
        .unwrap();

    assert!(started.elapsed() > Duration::from_millis(500));
    let body = std::fs::read(resource.path()).unwrap();
    assert_eq!(body.len(), 8 * 64);
    assert_eq!(body[body.len() - 1], 7);
}

#[tokio::test]
async fn given_malformed_url_when_fetching_then_invalid_url() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), Duration::from_secs(1));

    let result = fetcher.fetch("not a url").await;

    assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
}

#[tokio::test]
async fn given_unreachable_host_when_fetching_then_request_failed() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), Duration::from_secs(2));

    // Port 9 (discard) is closed on test hosts.
    let result = fetcher.fetch("http://127.0.0.1:9/audio.mp3").await;

    assert!(matches!(result, Err(FetchError::RequestFailed(_))));
    assert_eq!(scratch_entries(dir.path()), 0);
}
