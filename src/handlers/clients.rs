// src/handlers/clients.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::client::{
        ClientAsset, ClientDetail, ClientListEntry, CreateClientPayload, LinkPortalUserPayload,
        ProjectStatusResponse, RegisterAssetPayload, UpdateClientPayload, UpdateStatusPayload,
    },
    models::export::GenerationSummary,
};

#[derive(Debug, serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClientResponse {
    pub message: String,
    pub deleted_scripts_count: i64,
}

// =============================================================================
//  CRUD
// =============================================================================

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    responses(
        (status = 200, description = "Todos os clientes, com contagem de roteiros", body = Vec<ClientListEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list_clients().await?;
    Ok((StatusCode::OK, Json(clients)))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado com intake", body = ClientDetail),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state.client_service.create_client(&payload).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/clients/{client_id}
#[utoipa::path(
    get,
    path = "/api/clients/{client_id}",
    tag = "Clients",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente com intake e roteiros", body = ClientDetail),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.client_service.get_detail(client_id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// PATCH /api/clients/{client_id}
#[utoipa::path(
    patch,
    path = "/api/clients/{client_id}",
    tag = "Clients",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = ClientDetail),
        (status = 400, description = "Nenhum campo válido para atualizar")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state
        .client_service
        .update_client(client_id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(detail)))
}

// DELETE /api/clients/{client_id}
#[utoipa::path(
    delete,
    path = "/api/clients/{client_id}",
    tag = "Clients",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente removido", body = DeleteClientResponse),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted_scripts_count = app_state.client_service.delete_client(client_id).await?;

    Ok((
        StatusCode::OK,
        Json(DeleteClientResponse {
            message: "Client deleted successfully".to_string(),
            deleted_scripts_count,
        }),
    ))
}

// =============================================================================
//  WORKFLOW DE STATUS
// =============================================================================

// GET /api/clients/{client_id}/status
#[utoipa::path(
    get,
    path = "/api/clients/{client_id}/status",
    tag = "Clients",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Status e progresso do projeto", body = ProjectStatusResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_status(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let status = app_state.client_service.get_status(client_id).await?;
    Ok((StatusCode::OK, Json(status)))
}

// PATCH /api/clients/{client_id}/status
// O enum fechado no payload garante a rejeição de status desconhecidos.
#[utoipa::path(
    patch,
    path = "/api/clients/{client_id}/status",
    tag = "Clients",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = ProjectStatusResponse),
        (status = 400, description = "Status inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let status = app_state
        .client_service
        .update_status(client_id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(status)))
}

// =============================================================================
//  GERAÇÃO DO PACOTE DE ROTEIROS
// =============================================================================

// POST /api/clients/{client_id}/generate-scripts
#[utoipa::path(
    post,
    path = "/api/clients/{client_id}/generate-scripts",
    tag = "Clients",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 201, description = "Pacote de 30 roteiros criado", body = GenerationSummary),
        (status = 400, description = "Cliente sem intake"),
        (status = 502, description = "Falha na geração via LLM")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_scripts(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.generation_service.generate_pack(client_id).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

// =============================================================================
//  ACESSO AO PORTAL E ENTREGÁVEIS
// =============================================================================

// GET /api/clients/{client_id}/users
#[utoipa::path(
    get,
    path = "/api/clients/{client_id}/users",
    tag = "Clients",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Usuários com acesso ao portal", body = Vec<crate::models::auth::User>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_portal_users(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.client_service.list_portal_users(client_id).await?;
    Ok((StatusCode::OK, Json(users)))
}

// POST /api/clients/{client_id}/users
#[utoipa::path(
    post,
    path = "/api/clients/{client_id}/users",
    tag = "Clients",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    request_body = LinkPortalUserPayload,
    responses(
        (status = 200, description = "Usuário vinculado ao portal"),
        (status = 404, description = "Usuário não registrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn link_portal_user(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<LinkPortalUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state
        .client_service
        .link_portal_user(client_id, &payload.email)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Portal access granted",
            "userId": user.id,
        })),
    ))
}

// POST /api/clients/{client_id}/assets
#[utoipa::path(
    post,
    path = "/api/clients/{client_id}/assets",
    tag = "Clients",
    params(("client_id" = Uuid, Path, description = "ID do cliente")),
    request_body = RegisterAssetPayload,
    responses(
        (status = 201, description = "Entregável registrado", body = ClientAsset)
    ),
    security(("api_jwt" = []))
)]
pub async fn register_asset(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<RegisterAssetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let asset = app_state
        .client_service
        .register_asset(client_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(asset)))
}
