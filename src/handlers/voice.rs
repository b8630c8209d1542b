// src/handlers/voice.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    services::voice_service::SampleVoice,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoicePreviewPayload {
    #[validate(length(min = 1, message = "voiceId is required"))]
    pub voice_id: String,
    // Texto opcional; quando ausente a voz usa o texto padrão de prévia
    pub text: Option<String>,
}

// GET /api/voices
#[utoipa::path(
    get,
    path = "/api/voices",
    tag = "Voices",
    responses(
        (status = 200, description = "Catálogo curado de vozes de amostra", body = Vec<SampleVoice>)
    )
)]
pub async fn list_voices(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.voice_service.catalog())))
}

// POST /api/voice-preview
#[utoipa::path(
    post,
    path = "/api/voice-preview",
    tag = "Voices",
    request_body = VoicePreviewPayload,
    responses(
        (status = 200, description = "Áudio da prévia em base64"),
        (status = 400, description = "Texto acima de 500 caracteres"),
        (status = 404, description = "Voz desconhecida"),
        (status = 502, description = "Falha no provedor de TTS")
    )
)]
pub async fn voice_preview(
    State(app_state): State<AppState>,
    Json(payload): Json<VoicePreviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let audio = app_state
        .voice_service
        .preview(&payload.voice_id, payload.text.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(json!({ "audio": audio }))))
}
