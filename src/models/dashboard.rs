// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::activity::PortalActivity;
use crate::models::client::ProjectStatus;

// Totais calculados sobre a coleção de roteiros de um cliente
// (cards do topo da página do cliente no admin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptTotals {
    pub count: usize,
    pub words: usize,
    pub minutes: i64,
}

// Contagens por estado de revisão.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCounts {
    pub approved: usize,
    // Rascunhos + revisões pedidas: tudo que ainda espera alguém agir.
    pub pending: usize,
}

// Totais + contagens juntos, como o GET /api/clients/{id} devolve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ClientScriptStats {
    #[serde(flatten)]
    pub totals: ScriptTotals,
    #[serde(flatten)]
    pub review: ReviewCounts,
}

// Visão resumida do cliente dentro do dashboard do portal.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalClientSummary {
    pub id: Uuid,
    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub niche: String,
    pub tone: String,
    pub project_status: ProjectStatus,
    pub voice_id: Option<String>,
    pub avatar_id: Option<String>,
    pub package: Option<String>,
    pub payment_status: String,
    pub project_start_date: Option<DateTime<Utc>>,
    pub project_delivery_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalStats {
    pub total_videos: i64,
    pub total_scripts: usize,
    pub scripts_approved: usize,
    pub scripts_pending: usize,
    pub last_upload: Option<DateTime<Utc>>,
    pub project_progress: u8,
}

// GET /api/portal/dashboard
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalDashboard {
    pub has_clients: bool,
    pub clients: Vec<PortalClientSummary>,
    pub stats: PortalStats,
    pub activity: Vec<PortalActivity>,
}

impl PortalDashboard {
    /// Dashboard devolvido quando o usuário ainda não tem cliente vinculado.
    pub fn empty() -> Self {
        Self {
            has_clients: false,
            clients: Vec::new(),
            stats: PortalStats {
                total_videos: 0,
                total_scripts: 0,
                scripts_approved: 0,
                scripts_pending: 0,
                last_upload: None,
                project_progress: 0,
            },
            activity: Vec::new(),
        }
    }
}
