use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::infrastructure::observability::{RequestId, redact_url};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionRequest {
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Serialize)]
pub struct TranscriptionCreatedResponse {
    pub id: String,
}

pub async fn azure_transcription_handler(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<TranscriptionRequest>,
) -> impl IntoResponse {
    let Some(audio_url) = request
        .audio_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
    else {
        tracing::warn!("Transcription request without audioUrl");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "audioUrl is required".to_string(),
            }),
        )
            .into_response();
    };

    let language = request
        .language
        .as_deref()
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(state.default_language.as_str());

    let span = tracing::info_span!(
        "transcription",
        request_id = %request_id.map(|Extension(id)| id.0).unwrap_or_default(),
        audio_url = %redact_url(audio_url),
        language = %language,
    );

    match state
        .transcription_service
        .transcribe_and_save(audio_url, language)
        .instrument(span.clone())
        .await
    {
        Ok(record) => (
            StatusCode::CREATED,
            Json(TranscriptionCreatedResponse {
                id: record.id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            span.in_scope(|| {
                tracing::error!(stage = e.stage(), error = %e, "Transcription failed");
            });
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to transcribe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
