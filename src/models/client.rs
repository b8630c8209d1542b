// src/models/client.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::dashboard::ClientScriptStats;
use crate::models::script::Script;

// --- ENUMS ---

// Mapeia o CREATE TYPE project_status do banco. Conjunto fechado: qualquer
// string fora destes 10 valores é rejeitada já na desserialização.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "project_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Discovery,
    Onboarding,
    AvatarCreation,
    Scriptwriting,
    VideoProduction,
    QaReview,
    Delivered,
    Ongoing,
    Paused,
    Disputed,
}

impl ProjectStatus {
    // Os 7 passos lineares do fluxo de entrega, na ordem.
    // `ongoing` fica fora da linha e conta como 100%; `paused`/`disputed`
    // são estados laterais sem percentual.
    pub const LINEAR_STEPS: [ProjectStatus; 7] = [
        ProjectStatus::Discovery,
        ProjectStatus::Onboarding,
        ProjectStatus::AvatarCreation,
        ProjectStatus::Scriptwriting,
        ProjectStatus::VideoProduction,
        ProjectStatus::QaReview,
        ProjectStatus::Delivered,
    ];

    pub fn linear_index(self) -> Option<usize> {
        Self::LINEAR_STEPS.iter().position(|s| *s == self)
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Discovery => "Discovery",
            ProjectStatus::Onboarding => "Onboarding",
            ProjectStatus::AvatarCreation => "Avatar Creation",
            ProjectStatus::Scriptwriting => "Scriptwriting",
            ProjectStatus::VideoProduction => "Video Production",
            ProjectStatus::QaReview => "QA Review",
            ProjectStatus::Delivered => "Delivered",
            ProjectStatus::Ongoing => "Ongoing",
            ProjectStatus::Paused => "Paused",
            ProjectStatus::Disputed => "Disputed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ProjectStatus::Discovery => "Initial consultation and planning",
            ProjectStatus::Onboarding => "Collecting your brand information",
            ProjectStatus::AvatarCreation => "Setting up your AI spokesperson",
            ProjectStatus::Scriptwriting => "Generating your custom scripts",
            ProjectStatus::VideoProduction => "Creating your AI videos",
            ProjectStatus::QaReview => "Quality assurance and final checks",
            ProjectStatus::Delivered => "Your videos are ready!",
            ProjectStatus::Ongoing => "Active subscription",
            ProjectStatus::Paused => "Project temporarily on hold",
            ProjectStatus::Disputed => "Requires attention",
        }
    }

    /// Percentual de conclusão: `indice / 6 * 100` nos passos lineares,
    /// 100 em `ongoing`, nenhum nos estados laterais.
    pub fn progress_percent(self) -> Option<u8> {
        if self == ProjectStatus::Ongoing {
            return Some(100);
        }
        self.linear_index()
            .map(|index| (index as f64 / (Self::LINEAR_STEPS.len() - 1) as f64 * 100.0).round() as u8)
    }

    /// Monta o relatório completo de progresso exibido no portal.
    pub fn progress_report(self) -> ProgressReport {
        if matches!(self, ProjectStatus::Paused | ProjectStatus::Disputed) {
            return ProgressReport {
                percent: None,
                steps: Vec::new(),
                hold: Some(HoldReport {
                    label: self.label(),
                    description: self.description(),
                }),
            };
        }

        let current_index = self.linear_index();
        let is_ongoing = self == ProjectStatus::Ongoing;

        let steps = Self::LINEAR_STEPS
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let state = if is_ongoing || current_index.is_some_and(|c| index < c) {
                    StepState::Completed
                } else if current_index == Some(index) {
                    StepState::Current
                } else {
                    StepState::Pending
                };
                ProgressStep {
                    status: *step,
                    label: step.label(),
                    state,
                }
            })
            .collect();

        ProgressReport {
            percent: self.progress_percent(),
            steps,
            hold: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Current,
    Pending,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStep {
    pub status: ProjectStatus,
    pub label: &'static str,
    pub state: StepState,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldReport {
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    // None quando o projeto está em paused/disputed
    pub percent: Option<u8>,
    // Vazio nos estados laterais; o front mostra o painel de `hold`
    pub steps: Vec<ProgressStep>,
    pub hold: Option<HoldReport>,
}

// --- CLIENTE ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,

    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub niche: String,
    pub tone: String,
    pub goals: String,
    pub notes: Option<String>,

    // Termos comerciais
    pub payment_status: String,
    pub payment_amount: Option<Decimal>,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub package: Option<String>,
    pub package_price: Option<Decimal>,
    pub is_subscription: bool,

    // Ciclo de vida do projeto
    pub project_status: ProjectStatus,
    pub project_start_date: Option<DateTime<Utc>>,
    pub project_delivery_date: Option<DateTime<Utc>>,

    // Avatar/voz escolhidos para o porta-voz
    pub avatar_id: Option<String>,
    pub voice_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Entrada da listagem do admin: cliente + contagem de roteiros.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientListEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub client: Client,
    pub script_count: i64,
}

// --- INTAKE (material bruto enviado pelo cliente) ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientIntake {
    pub id: Uuid,
    pub client_id: Uuid,

    pub raw_faqs: String,
    pub raw_offers: String,
    pub raw_testimonials: String,
    pub raw_promos: String,
    pub brand_voice_notes: String,
    // "references" é palavra reservada no SQL; a coluna chama reference_links
    #[serde(rename = "references")]
    pub reference_links: String,

    pub brand_colors: Option<String>,
    pub logo_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Cliente com as relações carregadas (GET /api/clients/{id})
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub intake: Option<ClientIntake>,
    pub scripts: Vec<Script>,
    // Agregados da coleção de roteiros (cards do topo da página)
    pub stats: ClientScriptStats,
}

// --- ASSETS (entregáveis enviados ao cliente) ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientAsset {
    pub id: Uuid,
    pub client_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
}

// --- PAYLOADS ---

// Intake completo: dados do negócio + material bruto, num formulário só.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Sunrise Dental")]
    pub business_name: String,

    #[validate(length(min = 1, message = "required"))]
    pub contact_name: String,

    #[validate(email(message = "invalid_email"))]
    pub email: String,

    pub phone: Option<String>,
    pub website: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Dentist / Dental Practice")]
    pub niche: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Warm and friendly")]
    pub tone: String,

    #[validate(length(min = 1, message = "required"))]
    pub goals: String,

    pub notes: Option<String>,

    #[serde(default)]
    pub raw_faqs: String,
    #[serde(default)]
    pub raw_offers: String,
    #[serde(default)]
    pub raw_testimonials: String,
    #[serde(default)]
    pub raw_promos: String,
    #[serde(default)]
    pub brand_voice_notes: String,
    #[serde(default, rename = "references")]
    pub reference_links: String,

    pub brand_colors: Option<String>,
    pub logo_url: Option<String>,
}

// Atualização parcial do cliente. Campos ausentes ficam como estão.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    pub business_name: Option<String>,
    pub contact_name: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub niche: Option<String>,
    pub tone: Option<String>,
    pub goals: Option<String>,
    pub notes: Option<String>,
    pub payment_status: Option<String>,
    pub payment_amount: Option<Decimal>,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
}

impl UpdateClientPayload {
    pub fn is_empty(&self) -> bool {
        self.business_name.is_none()
            && self.contact_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.website.is_none()
            && self.niche.is_none()
            && self.tone.is_none()
            && self.goals.is_none()
            && self.notes.is_none()
            && self.payment_status.is_none()
            && self.payment_amount.is_none()
            && self.payment_date.is_none()
            && self.payment_method.is_none()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    pub status: ProjectStatus,
}

// Resposta de GET/PATCH /api/clients/{id}/status
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusResponse {
    pub client_id: Uuid,
    pub current_status: ProjectStatus,
    pub project_start_date: Option<DateTime<Utc>>,
    pub project_delivery_date: Option<DateTime<Utc>>,
    pub progress: ProgressReport,
}

// Vincula um usuário já registrado ao portal deste cliente.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LinkPortalUserPayload {
    #[validate(email(message = "invalid_email"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAssetPayload {
    #[validate(length(min = 1, message = "required"))]
    pub file_name: String,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "video/mp4")]
    pub file_type: String,
    #[validate(length(min = 1, message = "required"))]
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_percentages_follow_index_over_six() {
        let expected = [0u8, 17, 33, 50, 67, 83, 100];
        for (index, status) in ProjectStatus::LINEAR_STEPS.iter().enumerate() {
            assert_eq!(status.progress_percent(), Some(expected[index]));
        }
    }

    #[test]
    fn percentages_are_monotonic_along_the_path() {
        let mut last = 0u8;
        for status in ProjectStatus::LINEAR_STEPS {
            let percent = status.progress_percent().unwrap();
            assert!(percent >= last);
            last = percent;
        }
    }

    #[test]
    fn ongoing_is_always_complete() {
        assert_eq!(ProjectStatus::Ongoing.progress_percent(), Some(100));
        let report = ProjectStatus::Ongoing.progress_report();
        assert_eq!(report.percent, Some(100));
        assert!(report
            .steps
            .iter()
            .all(|step| step.state == StepState::Completed));
        assert!(report.hold.is_none());
    }

    #[test]
    fn side_states_have_no_percentage() {
        for status in [ProjectStatus::Paused, ProjectStatus::Disputed] {
            assert_eq!(status.progress_percent(), None);
            let report = status.progress_report();
            assert_eq!(report.percent, None);
            assert!(report.steps.is_empty());
            assert_eq!(report.hold.unwrap().label, status.label());
        }
    }

    #[test]
    fn report_marks_completed_current_and_pending() {
        let report = ProjectStatus::Scriptwriting.progress_report();
        assert_eq!(report.percent, Some(50));
        let states: Vec<StepState> = report.steps.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![
                StepState::Completed,
                StepState::Completed,
                StepState::Completed,
                StepState::Current,
                StepState::Pending,
                StepState::Pending,
                StepState::Pending,
            ]
        );
    }

    #[test]
    fn status_serializes_as_kebab_case() {
        let json = serde_json::to_string(&ProjectStatus::AvatarCreation).unwrap();
        assert_eq!(json, "\"avatar-creation\"");
        let parsed: ProjectStatus = serde_json::from_str("\"qa-review\"").unwrap();
        assert_eq!(parsed, ProjectStatus::QaReview);
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        let result = serde_json::from_str::<ProjectStatus>("\"archived\"");
        assert!(result.is_err());
    }

    #[test]
    fn empty_update_payload_is_detected() {
        assert!(UpdateClientPayload::default().is_empty());
        let payload = UpdateClientPayload {
            niche: Some("Med Spa / Aesthetics".to_string()),
            ..Default::default()
        };
        assert!(!payload.is_empty());
    }
}
