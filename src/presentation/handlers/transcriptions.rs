use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Transcription, TranscriptionId};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResponse {
    pub id: String,
    pub audio_url: String,
    pub transcription: String,
    pub source: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Transcription> for TranscriptionResponse {
    fn from(record: Transcription) -> Self {
        Self {
            id: record.id.to_string(),
            audio_url: record.audio_url,
            transcription: record.text,
            source: record.source.as_str().to_string(),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct TranscriptionListResponse {
    pub items: Vec<TranscriptionResponse>,
}

#[tracing::instrument(skip(state))]
pub async fn list_transcriptions_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.transcription_service.list_recent().await {
        Ok(records) => {
            let items = records.into_iter().map(TranscriptionResponse::from).collect();
            (StatusCode::OK, Json(TranscriptionListResponse { items })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list transcriptions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch transcriptions".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_transcription_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let uuid = match Uuid::parse_str(&id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid id: {}", id),
                }),
            )
                .into_response();
        }
    };

    match state
        .transcription_service
        .get(TranscriptionId::from_uuid(uuid))
        .await
    {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(TranscriptionResponse::from(record))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Transcription not found: {}", id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch transcription");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch transcription".to_string(),
                }),
            )
                .into_response()
        }
    }
}
