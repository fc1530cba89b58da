use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;

use super::{HealthResponse, SpeakRequest, SpeechResponse, VoicesResponse};
use crate::api::routes::AppState;
use crate::audio::AssembledAudio;
use crate::error::AppError;
use crate::tts::VOICES;

pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> Result<Json<SpeechResponse>, AppError> {
    let audio = generate(&state, payload).await?;

    Ok(Json(SpeechResponse {
        success: true,
        audio_data: general_purpose::STANDARD.encode(&audio.bytes),
        mime_type: audio.mime_type,
        file_extension: audio.file_extension,
    }))
}

pub async fn text_to_speech_file(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let audio = generate(&state, payload).await?;
    let filename = download_name(&audio.file_extension);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, audio.mime_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        audio.bytes,
    )
        .into_response())
}

async fn generate(
    state: &AppState,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> Result<AssembledAudio, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = request.into_speech_request()?;

    state.tts.speak(&request).await
}

fn download_name(extension: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("speech_{}{}", &id[..8], extension)
}

pub async fn list_voices() -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: VOICES.iter().map(|v| v.to_string()).collect(),
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        api_key_configured: state.config.api_key_configured(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Serve the bundled frontend, or describe the API when there is none.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let index_path = state.config.static_dir.join("index.html");
    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Json(serde_json::json!({
            "message": "Gemini TTS API is running!",
            "endpoints": {
                "POST /api/text-to-speech": "Generate speech from text (returns base64)",
                "POST /api/text-to-speech/file": "Generate speech from text (returns file)",
                "GET /api/voices": "Get available voices",
                "GET /health": "Health check"
            },
            "frontend": "Place index.html in the static directory to access the web interface"
        }))
        .into_response()),
        Err(e) => Err(e.into()),
    }
}
