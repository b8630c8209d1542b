// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Toda falha da aplicação vira uma variante daqui e sai como JSON `{ "error": ... }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validações manuais que não passam pelo derive do validator
    // (ex: notas de revisão em branco, lista de ids vazia).
    #[error("Payload inválido: {0}")]
    InvalidPayload(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Roteiro não encontrado")]
    ScriptNotFound,

    #[error("Voz não encontrada")]
    VoiceNotFound,

    #[error("Cliente sem intake")]
    IntakeMissing,

    #[error("Nada para exportar")]
    NothingToExport,

    // Ação de cliente sobre um roteiro já exportado. O único caminho de
    // volta a partir de `exported` é o force-set do admin.
    #[error("Roteiro já exportado")]
    ScriptLocked,

    #[error("Serviço externo falhou: {0}")]
    ExternalServiceError(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidPayload(message) => {
                let body = Json(json!({ "error": message }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "This email is already in use."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password."),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Missing or invalid authentication token."),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "You do not have access to this resource."),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            AppError::ClientNotFound => (StatusCode::NOT_FOUND, "Client not found"),
            AppError::ScriptNotFound => (StatusCode::NOT_FOUND, "Script not found"),
            AppError::VoiceNotFound => (StatusCode::NOT_FOUND, "Voice not found"),
            AppError::IntakeMissing => (
                StatusCode::BAD_REQUEST,
                "Client has no intake data. Please complete intake first.",
            ),
            AppError::NothingToExport => (StatusCode::BAD_REQUEST, "No scripts to export"),
            AppError::ScriptLocked => (
                StatusCode::CONFLICT,
                "Script has already been exported and can no longer be reviewed.",
            ),
            AppError::ExternalServiceError(ref detail) => {
                tracing::error!("Serviço externo falhou: {}", detail);
                (StatusCode::BAD_GATEWAY, "An external service failed. Please try again.")
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
