// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{ActivityRepository, ClientRepository, ScriptRepository, UserRepository},
    services::{
        auth::AuthService, client_service::ClientService, dashboard_service::DashboardService,
        email_service::EmailService, export_service::ExportService,
        generation_service::GenerationService, generation_service::LlmClient,
        script_service::ScriptService, voice_service::VoiceService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub script_service: ScriptService,
    pub generation_service: GenerationService,
    pub export_service: ExportService,
    pub dashboard_service: DashboardService,
    pub email_service: EmailService,
    pub voice_service: VoiceService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Chaves dos serviços externos são opcionais: sem elas a aplicação
        // sobe e os recursos correspondentes degradam (mock/erro explícito).
        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        let elevenlabs_api_key = env::var("ELEVENLABS_API_KEY").ok();
        let resend_api_key = env::var("RESEND_API_KEY").ok();
        let email_from =
            env::var("EMAIL_FROM").unwrap_or_else(|_| "BrandVoice <hello@brandvoice.ai>".to_string());
        let admin_email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@brandvoice.ai".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let script_repo = ScriptRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);

        let client_service = ClientService::new(
            client_repo.clone(),
            script_repo.clone(),
            user_repo,
            activity_repo.clone(),
            db_pool.clone(),
        );

        let script_service = ScriptService::new(
            script_repo.clone(),
            client_repo.clone(),
            activity_repo.clone(),
            db_pool.clone(),
        );

        let llm = LlmClient::new(openai_api_key)?;
        let generation_service = GenerationService::new(
            client_repo.clone(),
            script_repo.clone(),
            activity_repo.clone(),
            llm,
            db_pool.clone(),
        );

        let export_service = ExportService::new();
        let dashboard_service = DashboardService::new(client_repo, script_repo, activity_repo);
        let email_service = EmailService::new(resend_api_key, email_from, admin_email)?;
        let voice_service = VoiceService::new(elevenlabs_api_key)?;

        // Provisiona o admin do painel quando ADMIN_PASSWORD estiver no ambiente
        if let Ok(admin_password) = env::var("ADMIN_PASSWORD") {
            auth_service
                .ensure_admin(email_service.admin_email(), &admin_password)
                .await?;
        }

        Ok(Self {
            db_pool,
            auth_service,
            client_service,
            script_service,
            generation_service,
            export_service,
            dashboard_service,
            email_service,
            voice_service,
        })
    }
}
