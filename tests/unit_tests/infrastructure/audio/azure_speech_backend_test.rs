#[path = "../../../helpers/mod.rs"]
mod helpers;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::json;

use audioscribe::application::ports::{RecognitionError, RecognitionSession, SpeechBackend};
use audioscribe::application::services::RecognizerClient;
use audioscribe::infrastructure::audio::{
    AzureSpeechBackend, RecognitionResponse, WAV_CONTENT_TYPE, map_recognition_response,
};

use helpers::mock_server::start_mock_server;

const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";

fn wav_file(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("audio_test.wav");
    std::fs::write(&path, b"RIFF\x24\x00\x00\x00WAVEfmt ").unwrap();
    path
}

async fn success_handler(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let authorized = headers
        .get("Ocp-Apim-Subscription-Key")
        .and_then(|v| v.to_str().ok())
        == Some("test-key");
    let wav = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        == Some(WAV_CONTENT_TYPE);

    if !authorized {
        return (StatusCode::UNAUTHORIZED, "invalid subscription key").into_response();
    }
    if !wav || body.is_empty() || params.get("language").map(String::as_str) != Some("de-DE") {
        return (StatusCode::BAD_REQUEST, "bad request").into_response();
    }

    axum::Json(json!({
        "RecognitionStatus": "Success",
        "DisplayText": "  Hallo Welt.  ",
        "Offset": 0,
        "Duration": 12300000
    }))
    .into_response()
}

async fn no_match_handler() -> impl IntoResponse {
    axum::Json(json!({ "RecognitionStatus": "NoMatch", "Offset": 0, "Duration": 0 }))
}

async fn slow_handler() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(10)).await;
    axum::Json(json!({ "RecognitionStatus": "Success", "DisplayText": "late" }))
}

#[tokio::test]
async fn given_successful_recognition_when_recognizing_then_returns_trimmed_text() {
    let app = Router::new().route(RECOGNITION_PATH, post(success_handler));
    let (base_url, _shutdown) = start_mock_server(app).await;
    let dir = tempfile::tempdir().unwrap();
    let backend = AzureSpeechBackend::with_endpoint("test-key", &base_url);

    let mut session = backend.open_session("de-DE").await.unwrap();
    assert_eq!(backend.open_sessions(), 1);
    let text = session.recognize_once(&wav_file(dir.path())).await.unwrap();
    session.close();
    session.close();

    assert_eq!(text, "Hallo Welt.");
    assert_eq!(backend.open_sessions(), 0);
}

#[tokio::test]
async fn given_wrong_key_when_recognizing_then_canceled_with_status() {
    let app = Router::new().route(RECOGNITION_PATH, post(success_handler));
    let (base_url, _shutdown) = start_mock_server(app).await;
    let dir = tempfile::tempdir().unwrap();
    let backend = AzureSpeechBackend::with_endpoint("wrong-key", &base_url);

    let mut session = backend.open_session("de-DE").await.unwrap();
    let result = session.recognize_once(&wav_file(dir.path())).await;
    session.close();

    match result {
        Err(RecognitionError::Canceled { reason, detail }) => {
            assert_eq!(reason, "Error");
            assert!(detail.contains("401"), "{}", detail);
        }
        other => panic!("expected Canceled, got {:?}", other),
    }
}

#[tokio::test]
async fn given_no_speech_when_recognizing_then_no_match() {
    let app = Router::new().route(RECOGNITION_PATH, post(no_match_handler));
    let (base_url, _shutdown) = start_mock_server(app).await;
    let dir = tempfile::tempdir().unwrap();
    let backend = AzureSpeechBackend::with_endpoint("test-key", &format!("{}/", base_url));

    let mut session = backend.open_session("en-US").await.unwrap();
    let result = session.recognize_once(&wav_file(dir.path())).await;
    session.close();

    assert_eq!(result, Err(RecognitionError::NoMatch));
}

#[tokio::test]
async fn given_missing_audio_file_when_recognizing_then_canceled_audio_read() {
    let backend = AzureSpeechBackend::with_endpoint("test-key", "http://127.0.0.1:9");

    let mut session = backend.open_session("en-US").await.unwrap();
    let result = session
        .recognize_once(Path::new("/nonexistent/audio_missing.wav"))
        .await;
    session.close();

    assert!(matches!(result, Err(RecognitionError::Canceled { ref reason, .. }) if reason == "AudioRead"));
}

#[tokio::test]
async fn given_slow_service_when_recognizing_through_client_then_times_out_and_session_released() {
    let app = Router::new().route(RECOGNITION_PATH, post(slow_handler));
    let (base_url, _shutdown) = start_mock_server(app).await;
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(AzureSpeechBackend::with_endpoint("test-key", &base_url));
    let timeout = Duration::from_millis(200);
    let client = RecognizerClient::new(backend.clone(), timeout);

    let result = client.recognize_once(&wav_file(dir.path()), "en-US").await;

    assert_eq!(result, Err(RecognitionError::TimedOut(timeout)));
    assert_eq!(backend.open_sessions(), 0);
}

#[test]
fn given_success_status_when_mapping_then_returns_display_text() {
    let response = RecognitionResponse {
        recognition_status: "Success".into(),
        display_text: Some("Hello world.".into()),
    };

    assert_eq!(map_recognition_response(response).unwrap(), "Hello world.");
}

#[test]
fn given_initial_silence_timeout_when_mapping_then_no_match() {
    let response = RecognitionResponse {
        recognition_status: "InitialSilenceTimeout".into(),
        display_text: None,
    };

    assert_eq!(map_recognition_response(response), Err(RecognitionError::NoMatch));
}

#[test]
fn given_unknown_status_when_mapping_then_canceled_with_status_as_reason() {
    let response = RecognitionResponse {
        recognition_status: "BabbleTimeout".into(),
        display_text: None,
    };

    assert_eq!(
        map_recognition_response(response),
        Err(RecognitionError::canceled("BabbleTimeout", ""))
    );
}

#[test]
fn given_response_json_without_display_text_when_deserializing_then_text_is_none() {
    let response: RecognitionResponse =
        serde_json::from_str(r#"{"RecognitionStatus":"NoMatch","Offset":0}"#).unwrap();

    assert_eq!(response.recognition_status, "NoMatch");
    assert!(response.display_text.is_none());
}
