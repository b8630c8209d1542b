// src/models/export.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::script::{ScriptStatus, ScriptType};

// Identidade do cliente embutida no JSON exportado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportClientInfo {
    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub niche: String,
    pub tone: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportScript {
    #[serde(rename = "type")]
    pub script_type: ScriptType,
    pub title: String,
    pub script_text: String,
    pub duration_seconds: i32,
    pub status: ScriptStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportTypeEntry {
    pub title: String,
    pub script_text: String,
    pub duration_seconds: i32,
}

// Quebra redundante por categoria, sempre com as seis chaves fixas.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ExportByType {
    #[serde(rename = "FAQ")]
    pub faq: Vec<ExportTypeEntry>,
    #[serde(rename = "SERVICE")]
    pub service: Vec<ExportTypeEntry>,
    #[serde(rename = "PROMO")]
    pub promo: Vec<ExportTypeEntry>,
    #[serde(rename = "TESTIMONIAL")]
    pub testimonial: Vec<ExportTypeEntry>,
    #[serde(rename = "TIP")]
    pub tip: Vec<ExportTypeEntry>,
    #[serde(rename = "BRAND")]
    pub brand: Vec<ExportTypeEntry>,
}

// GET /api/clients/{id}/export-json
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptsExport {
    pub client: ExportClientInfo,
    pub exported_at: DateTime<Utc>,
    pub scripts: Vec<ExportScript>,
    pub scripts_by_type: ExportByType,
}

// Resumo devolvido pela geração do pacote de 30 roteiros.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    pub total_scripts_created: usize,
    pub breakdown: GenerationBreakdown,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerationBreakdown {
    #[serde(rename = "FAQ")]
    pub faq: usize,
    #[serde(rename = "SERVICE")]
    pub service: usize,
    #[serde(rename = "PROMO")]
    pub promo: usize,
    #[serde(rename = "TESTIMONIAL")]
    pub testimonial: usize,
    #[serde(rename = "TIP")]
    pub tip: usize,
    #[serde(rename = "BRAND")]
    pub brand: usize,
}
