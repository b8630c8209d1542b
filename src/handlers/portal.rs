// src/handlers/portal.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::PortalDashboard,
    models::script::{PortalReviewPayload, PortalReviewResponse, PortalScript},
};

// GET /api/portal/dashboard
#[utoipa::path(
    get,
    path = "/api/portal/dashboard",
    tag = "Portal",
    responses(
        (status = 200, description = "Visão geral do portal do cliente", body = PortalDashboard),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let dashboard = app_state
        .dashboard_service
        .portal_dashboard(user.0.id)
        .await?;
    Ok((StatusCode::OK, Json(dashboard)))
}

// GET /api/portal/scripts
#[utoipa::path(
    get,
    path = "/api/portal/scripts",
    tag = "Portal",
    responses(
        (status = 200, description = "Roteiros visíveis para o usuário", body = Vec<PortalScript>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_scripts(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let scripts = app_state
        .script_service
        .list_portal_scripts(user.0.id)
        .await?;

    let scripts: Vec<PortalScript> = scripts.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(scripts)))
}

// GET /api/portal/scripts/{script_id}
#[utoipa::path(
    get,
    path = "/api/portal/scripts/{script_id}",
    tag = "Portal",
    params(("script_id" = Uuid, Path, description = "ID do roteiro")),
    responses(
        (status = 200, description = "Roteiro com contagem de palavras", body = PortalScript),
        (status = 404, description = "Roteiro não encontrado ou de outro cliente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_script(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(script_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let script = app_state
        .script_service
        .get_portal_script(script_id, user.0.id)
        .await?;

    Ok((StatusCode::OK, Json(PortalScript::from(script))))
}

// PATCH /api/portal/scripts/{script_id}
// Ação do cliente: aprovar ou pedir revisão (com notas obrigatórias).
#[utoipa::path(
    patch,
    path = "/api/portal/scripts/{script_id}",
    tag = "Portal",
    params(("script_id" = Uuid, Path, description = "ID do roteiro")),
    request_body = PortalReviewPayload,
    responses(
        (status = 200, description = "Transição aplicada", body = PortalReviewResponse),
        (status = 400, description = "Notas de revisão em branco"),
        (status = 404, description = "Roteiro não encontrado"),
        (status = 409, description = "Roteiro já exportado")
    ),
    security(("api_jwt" = []))
)]
pub async fn review_script(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(script_id): Path<Uuid>,
    Json(payload): Json<PortalReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state
        .script_service
        .review_script(script_id, user.0.id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}
