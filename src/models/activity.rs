// src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE activity_type do banco
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    VideoUploaded,
    ScriptGenerated,
    ScriptApproved,
    StatusChanged,
    PaymentReceived,
    AccountCreated,
}

// Entrada do log de transparência do portal. Append-only: o backend só
// insere; nada no portal atualiza ou apaga uma entrada existente.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalActivity {
    pub id: Uuid,
    pub client_id: Uuid,

    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub description: String,

    pub created_at: DateTime<Utc>,
}
