// src/handlers/scripts.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::script::{BulkUpdatePayload, BulkUpdateResponse, Script, UpdateScriptPayload},
};

// GET /api/scripts/{script_id}
#[utoipa::path(
    get,
    path = "/api/scripts/{script_id}",
    tag = "Scripts",
    params(("script_id" = Uuid, Path, description = "ID do roteiro")),
    responses(
        (status = 200, description = "Roteiro", body = Script),
        (status = 404, description = "Roteiro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_script(
    State(app_state): State<AppState>,
    Path(script_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let script = app_state.script_service.get_script(script_id).await?;
    Ok((StatusCode::OK, Json(script)))
}

// PATCH /api/scripts/{script_id}
// Caminho privilegiado do admin: edita texto e pode forçar qualquer status
// entre draft/approved/exported (inclusive devolver um exported para draft).
#[utoipa::path(
    patch,
    path = "/api/scripts/{script_id}",
    tag = "Scripts",
    params(("script_id" = Uuid, Path, description = "ID do roteiro")),
    request_body = UpdateScriptPayload,
    responses(
        (status = 200, description = "Roteiro atualizado", body = Script),
        (status = 400, description = "Status inválido ou payload vazio"),
        (status = 404, description = "Roteiro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_script(
    State(app_state): State<AppState>,
    Path(script_id): Path<Uuid>,
    Json(payload): Json<UpdateScriptPayload>,
) -> Result<impl IntoResponse, AppError> {
    let script = app_state
        .script_service
        .update_script(script_id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(script)))
}

// DELETE /api/scripts/{script_id}
#[utoipa::path(
    delete,
    path = "/api/scripts/{script_id}",
    tag = "Scripts",
    params(("script_id" = Uuid, Path, description = "ID do roteiro")),
    responses(
        (status = 200, description = "Roteiro removido"),
        (status = 404, description = "Roteiro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_script(
    State(app_state): State<AppState>,
    Path(script_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.script_service.delete_script(script_id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Script deleted successfully",
            "deletedScriptId": script_id,
        })),
    ))
}

// PATCH /api/scripts/bulk-update
#[utoipa::path(
    patch,
    path = "/api/scripts/bulk-update",
    tag = "Scripts",
    request_body = BulkUpdatePayload,
    responses(
        (status = 200, description = "Contagem de roteiros atualizados", body = BulkUpdateResponse),
        (status = 400, description = "Lista vazia ou status inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn bulk_update(
    State(app_state): State<AppState>,
    Json(payload): Json<BulkUpdatePayload>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state.script_service.bulk_update(&payload).await?;
    Ok((StatusCode::OK, Json(response)))
}
