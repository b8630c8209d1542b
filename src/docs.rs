// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::create_client,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,
        handlers::clients::get_status,
        handlers::clients::update_status,
        handlers::clients::generate_scripts,
        handlers::clients::list_portal_users,
        handlers::clients::link_portal_user,
        handlers::clients::register_asset,

        // --- Scripts ---
        handlers::scripts::get_script,
        handlers::scripts::update_script,
        handlers::scripts::delete_script,
        handlers::scripts::bulk_update,

        // --- Exports ---
        handlers::exports::export_text,
        handlers::exports::export_json,
        handlers::exports::export_pdf,

        // --- Portal ---
        handlers::portal::dashboard,
        handlers::portal::list_scripts,
        handlers::portal::get_script,
        handlers::portal::review_script,

        // --- Voices ---
        handlers::voice::list_voices,
        handlers::voice::voice_preview,

        // --- Email ---
        handlers::email::send_test_email,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Clients ---
            models::client::ProjectStatus,
            models::client::StepState,
            models::client::ProgressStep,
            models::client::HoldReport,
            models::client::ProgressReport,
            models::client::Client,
            models::client::ClientListEntry,
            models::client::ClientIntake,
            models::client::ClientDetail,
            models::client::ClientAsset,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,
            models::client::UpdateStatusPayload,
            models::client::ProjectStatusResponse,
            models::client::LinkPortalUserPayload,
            models::client::RegisterAssetPayload,

            // --- Scripts ---
            models::script::ScriptType,
            models::script::ScriptStatus,
            models::script::ReviewAction,
            models::script::Script,
            models::script::PortalScript,
            models::script::UpdateScriptPayload,
            models::script::BulkUpdatePayload,
            models::script::BulkUpdateResponse,
            models::script::PortalReviewPayload,
            models::script::PortalReviewResponse,

            // --- Dashboard ---
            models::dashboard::ScriptTotals,
            models::dashboard::ReviewCounts,
            models::dashboard::ClientScriptStats,
            models::dashboard::PortalClientSummary,
            models::dashboard::PortalStats,
            models::dashboard::PortalDashboard,

            // --- Activity ---
            models::activity::ActivityType,
            models::activity::PortalActivity,

            // --- Exports ---
            models::export::ExportClientInfo,
            models::export::ExportScript,
            models::export::ExportTypeEntry,
            models::export::ExportByType,
            models::export::ScriptsExport,
            models::export::GenerationSummary,
            models::export::GenerationBreakdown,

            // --- Payloads dos handlers ---
            handlers::clients::DeleteClientResponse,
            handlers::voice::VoicePreviewPayload,
            handlers::email::TestEmailPayload,

            // --- Voices ---
            crate::services::voice_service::SampleVoice,

            // --- Email ---
            crate::services::email_service::EmailKind,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e registro"),
        (name = "Users", description = "Dados do usuário autenticado"),
        (name = "Clients", description = "Gestão de clientes, intake e workflow de status"),
        (name = "Scripts", description = "Roteiros: edição, bulk update e remoção"),
        (name = "Exports", description = "Exportação do pacote de roteiros (TXT, JSON, PDF)"),
        (name = "Portal", description = "Portal do cliente: dashboard, revisão e atividade"),
        (name = "Voices", description = "Catálogo de vozes e prévia de áudio"),
        (name = "Email", description = "E-mails transacionais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
