// src/models/script.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::text;

// --- ENUMS ---

// Mapeia o CREATE TYPE script_type do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "script_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ScriptType {
    Faq,
    Service,
    Promo,
    Testimonial,
    Tip,
    Brand,
}

impl ScriptType {
    // Ordem fixa das categorias em todas as exportações.
    pub const ALL: [ScriptType; 6] = [
        ScriptType::Faq,
        ScriptType::Service,
        ScriptType::Promo,
        ScriptType::Testimonial,
        ScriptType::Tip,
        ScriptType::Brand,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScriptType::Faq => "FAQ",
            ScriptType::Service => "Service/Explainer",
            ScriptType::Promo => "Promo",
            ScriptType::Testimonial => "Testimonial",
            ScriptType::Tip => "Tip/Educational",
            ScriptType::Brand => "Brand/Credibility",
        }
    }

    // Cabeçalho de grupo usado na exportação em texto puro.
    pub fn export_heading(self) -> &'static str {
        match self {
            ScriptType::Faq => "FAQ SCRIPTS",
            ScriptType::Service => "SERVICE/EXPLAINER SCRIPTS",
            ScriptType::Promo => "PROMO SCRIPTS",
            ScriptType::Testimonial => "TESTIMONIAL SCRIPTS",
            ScriptType::Tip => "TIP/EDUCATIONAL SCRIPTS",
            ScriptType::Brand => "BRAND/CREDIBILITY SCRIPTS",
        }
    }

    // Chave usada no JSON exportado (FAQ, SERVICE, ...)
    pub fn key(self) -> &'static str {
        match self {
            ScriptType::Faq => "FAQ",
            ScriptType::Service => "SERVICE",
            ScriptType::Promo => "PROMO",
            ScriptType::Testimonial => "TESTIMONIAL",
            ScriptType::Tip => "TIP",
            ScriptType::Brand => "BRAND",
        }
    }
}

// Mapeia o CREATE TYPE script_status do banco.
// draft -> approved | revision_requested -> (admin devolve para draft) -> exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "script_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScriptStatus {
    Draft,
    Approved,
    RevisionRequested,
    Exported,
}

impl ScriptStatus {
    // Alvos permitidos no bulk-update e no force-set do admin.
    // `revision_requested` só nasce da ação do cliente no portal.
    pub const ADMIN_TARGETS: [ScriptStatus; 3] = [
        ScriptStatus::Draft,
        ScriptStatus::Approved,
        ScriptStatus::Exported,
    ];

    pub fn is_admin_target(self) -> bool {
        Self::ADMIN_TARGETS.contains(&self)
    }

    pub fn label(self) -> &'static str {
        match self {
            ScriptStatus::Draft => "Draft",
            ScriptStatus::Approved => "Approved",
            ScriptStatus::RevisionRequested => "Revision Requested",
            ScriptStatus::Exported => "Exported",
        }
    }
}

// Ação do cliente no portal de revisão.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    RequestRevision,
}

// --- ROTEIRO ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: Uuid,
    pub client_id: Uuid,

    #[serde(rename = "type")]
    pub script_type: ScriptType,
    pub title: String,
    pub script_text: String,

    // Quando nulo, a duração é derivada do texto (150 palavras/min).
    pub duration_seconds: Option<i32>,

    pub status: ScriptStatus,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Script {
    pub fn word_count(&self) -> usize {
        text::word_count(&self.script_text)
    }

    /// Duração armazenada, ou estimada do texto quando não há valor salvo.
    pub fn estimated_duration(&self) -> i32 {
        self.duration_seconds
            .unwrap_or_else(|| text::estimate_duration(&self.script_text))
    }
}

// Roteiro como o portal o exibe: com a contagem de palavras calculada.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalScript {
    #[serde(flatten)]
    pub script: Script,
    pub word_count: usize,
}

impl From<Script> for PortalScript {
    fn from(script: Script) -> Self {
        let word_count = script.word_count();
        Self { script, word_count }
    }
}

// --- PAYLOADS ---

// Atualização do admin: texto, título, notas e/ou force-set de status.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScriptPayload {
    pub title: Option<String>,
    pub script_text: Option<String>,
    pub status: Option<ScriptStatus>,
    pub notes: Option<String>,
}

impl UpdateScriptPayload {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.script_text.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdatePayload {
    pub script_ids: Vec<Uuid>,
    pub status: ScriptStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateResponse {
    pub message: String,
    pub count: u64,
    pub status: ScriptStatus,
}

// PATCH /api/portal/scripts/{id}
#[derive(Debug, Deserialize, ToSchema)]
pub struct PortalReviewPayload {
    pub action: ReviewAction,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalReviewResponse {
    pub success: bool,
    pub script: PortalScript,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_script(text: &str, duration: Option<i32>) -> Script {
        Script {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            script_type: ScriptType::Faq,
            title: "How long does whitening last?".to_string(),
            script_text: text.to_string(),
            duration_seconds: duration,
            status: ScriptStatus::Draft,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn stored_duration_wins_over_estimate() {
        let script = sample_script("one two three", Some(42));
        assert_eq!(script.estimated_duration(), 42);
    }

    #[test]
    fn missing_duration_is_estimated_from_text() {
        let text = vec!["word"; 75].join(" ");
        let script = sample_script(&text, None);
        assert_eq!(script.estimated_duration(), 30);
    }

    #[test]
    fn portal_script_carries_word_count() {
        let portal: PortalScript = sample_script("a quick spoken intro", None).into();
        assert_eq!(portal.word_count, 4);
    }

    #[test]
    fn script_type_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&ScriptType::Testimonial).unwrap(),
            "\"TESTIMONIAL\""
        );
        let parsed: ScriptType = serde_json::from_str("\"BRAND\"").unwrap();
        assert_eq!(parsed, ScriptType::Brand);
    }

    #[test]
    fn script_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ScriptStatus::RevisionRequested).unwrap(),
            "\"revision_requested\""
        );
        assert!(serde_json::from_str::<ScriptStatus>("\"archived\"").is_err());
    }

    #[test]
    fn revision_requested_is_not_an_admin_target() {
        assert!(ScriptStatus::Draft.is_admin_target());
        assert!(ScriptStatus::Approved.is_admin_target());
        assert!(ScriptStatus::Exported.is_admin_target());
        assert!(!ScriptStatus::RevisionRequested.is_admin_target());
    }

    #[test]
    fn review_action_parses_snake_case() {
        let action: ReviewAction = serde_json::from_str("\"request_revision\"").unwrap();
        assert_eq!(action, ReviewAction::RequestRevision);
        assert!(serde_json::from_str::<ReviewAction>("\"reject\"").is_err());
    }
}
