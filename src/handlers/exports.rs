// src/handlers/exports.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::export::ScriptsExport,
    services::export_service::ExportService,
};

// GET /api/clients/{client_id}/export-text
#[utoipa::path(
    get,
    path = "/api/clients/{client_id}/export-text",
    tag = "Exports",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Pacote de roteiros em texto puro", body = String, content_type = "text/plain"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_text(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let detail = app_state.client_service.get_detail(client_id).await?;

    let body = ExportService::format_text(&detail.client, &detail.scripts, Utc::now());
    let filename = ExportService::export_filename(&detail.client.business_name, "txt");

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, body).into_response())
}

// GET /api/clients/{client_id}/export-json
#[utoipa::path(
    get,
    path = "/api/clients/{client_id}/export-json",
    tag = "Exports",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Pacote de roteiros estruturado", body = ScriptsExport),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_json(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.client_service.get_detail(client_id).await?;

    let export = ExportService::build_json(&detail.client, &detail.scripts, Utc::now());
    Ok((StatusCode::OK, Json(export)))
}

// GET /api/clients/{client_id}/export-pdf
#[utoipa::path(
    get,
    path = "/api/clients/{client_id}/export-pdf",
    tag = "Exports",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "PDF do pacote de roteiros", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Cliente sem roteiros"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_pdf(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let detail = app_state.client_service.get_detail(client_id).await?;

    if detail.scripts.is_empty() {
        return Err(AppError::NothingToExport);
    }

    let pdf_bytes = app_state
        .export_service
        .render_pdf(&detail.client, &detail.scripts)?;

    let filename = ExportService::export_filename(&detail.client.business_name, "pdf");

    // Configura os headers para o navegador baixar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
