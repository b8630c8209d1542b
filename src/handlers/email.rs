// src/handlers/email.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    services::email_service::EmailKind,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TestEmailPayload {
    #[serde(rename = "type")]
    pub kind: EmailKind,
    // Destino opcional: sem ele, o teste vai para o e-mail do admin
    #[validate(email(message = "invalid_email"))]
    pub to: Option<String>,
}

// POST /api/email/test
// Dispara um template transacional de exemplo para conferir a configuração
// do provedor sem esperar um evento real de pagamento.
#[utoipa::path(
    post,
    path = "/api/email/test",
    tag = "Email",
    request_body = TestEmailPayload,
    responses(
        (status = 200, description = "E-mail de teste enviado"),
        (status = 502, description = "Provedor de e-mail indisponível ou não configurado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_test_email(
    State(app_state): State<AppState>,
    Json(payload): Json<TestEmailPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let to = payload
        .to
        .as_deref()
        .unwrap_or_else(|| app_state.email_service.admin_email());

    app_state.email_service.send_test(payload.kind, to).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": format!("Test email sent to {}", to) })),
    ))
}
