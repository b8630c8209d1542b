// src/services/client_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityRepository, ClientRepository, ScriptRepository, UserRepository},
    models::activity::ActivityType,
    models::auth::User,
    models::client::{
        Client, ClientAsset, ClientDetail, ClientListEntry, CreateClientPayload, ProjectStatus,
        ProjectStatusResponse, RegisterAssetPayload, UpdateClientPayload,
    },
    services::dashboard_service::DashboardService,
};

#[derive(Clone)]
pub struct ClientService {
    client_repo: ClientRepository,
    script_repo: ScriptRepository,
    user_repo: UserRepository,
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl ClientService {
    pub fn new(
        client_repo: ClientRepository,
        script_repo: ScriptRepository,
        user_repo: UserRepository,
        activity_repo: ActivityRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            client_repo,
            script_repo,
            user_repo,
            activity_repo,
            pool,
        }
    }

    // =========================================================================
    //  CRUD DE CLIENTES
    // =========================================================================

    /// Cria cliente + intake na mesma transação: se o intake falhar,
    /// o cliente órfão é desfeito junto.
    pub async fn create_client(
        &self,
        payload: &CreateClientPayload,
    ) -> Result<ClientDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let client = self.client_repo.create_client(&mut *tx, payload).await?;
        let intake = self
            .client_repo
            .create_intake(&mut *tx, client.id, payload)
            .await?;

        tx.commit().await?;

        tracing::info!("🆕 Cliente criado: {} ({})", client.business_name, client.id);

        Ok(ClientDetail {
            client,
            intake: Some(intake),
            stats: DashboardService::client_stats(&[]),
            scripts: Vec::new(),
        })
    }

    pub async fn list_clients(&self) -> Result<Vec<ClientListEntry>, AppError> {
        self.client_repo.list_clients().await
    }

    pub async fn get_client(&self, client_id: Uuid) -> Result<Client, AppError> {
        self.client_repo
            .find_by_id(client_id)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    /// Cliente com intake, roteiros e os agregados dos cards, como o
    /// painel do admin consome.
    pub async fn get_detail(&self, client_id: Uuid) -> Result<ClientDetail, AppError> {
        let client = self.get_client(client_id).await?;
        let intake = self.client_repo.find_intake(client_id).await?;
        let scripts = self.script_repo.list_by_client(client_id).await?;
        let stats = DashboardService::client_stats(&scripts);

        Ok(ClientDetail { client, intake, scripts, stats })
    }

    pub async fn update_client(
        &self,
        client_id: Uuid,
        payload: &UpdateClientPayload,
    ) -> Result<ClientDetail, AppError> {
        if payload.is_empty() {
            return Err(AppError::InvalidPayload("No valid fields to update".to_string()));
        }

        let updated = self
            .client_repo
            .update_client(client_id, payload)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let intake = self.client_repo.find_intake(client_id).await?;
        let scripts = self.script_repo.list_by_client(client_id).await?;
        let stats = DashboardService::client_stats(&scripts);

        Ok(ClientDetail { client: updated, intake, scripts, stats })
    }

    /// Remove o cliente (cascade leva intake, roteiros, vínculos e atividade).
    /// Devolve quantos roteiros foram junto, para a mensagem do admin.
    pub async fn delete_client(&self, client_id: Uuid) -> Result<i64, AppError> {
        let script_count = self.script_repo.count_by_client(client_id).await?;

        let deleted = self.client_repo.delete_client(client_id).await?;
        if deleted == 0 {
            return Err(AppError::ClientNotFound);
        }

        tracing::info!("🗑️ Cliente {} removido ({} roteiros)", client_id, script_count);
        Ok(script_count)
    }

    // =========================================================================
    //  WORKFLOW DE STATUS DO PROJETO
    // =========================================================================

    pub async fn get_status(&self, client_id: Uuid) -> Result<ProjectStatusResponse, AppError> {
        let client = self.get_client(client_id).await?;
        Ok(Self::status_response(&client))
    }

    /// Move o projeto de estágio. Efeitos colaterais de data:
    /// discovery -> onboarding carimba o início (uma vez só);
    /// qualquer chegada em delivered carimba a entrega.
    pub async fn update_status(
        &self,
        client_id: Uuid,
        status: ProjectStatus,
    ) -> Result<ProjectStatusResponse, AppError> {
        let client = self.get_client(client_id).await?;

        let start_date = (client.project_status == ProjectStatus::Discovery
            && status == ProjectStatus::Onboarding
            && client.project_start_date.is_none())
        .then(Utc::now);

        let delivery_date = (status == ProjectStatus::Delivered).then(Utc::now);

        let mut tx = self.pool.begin().await?;

        let updated = self
            .client_repo
            .update_status(&mut *tx, client_id, status, start_date, delivery_date)
            .await?;

        self.activity_repo
            .append(
                &mut *tx,
                client_id,
                ActivityType::StatusChanged,
                "Project status updated",
                &format!("Your project moved to {}", status.label()),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "📌 Status do cliente {} mudou para '{}'",
            client_id,
            status.label()
        );

        Ok(Self::status_response(&updated))
    }

    fn status_response(client: &Client) -> ProjectStatusResponse {
        ProjectStatusResponse {
            client_id: client.id,
            current_status: client.project_status,
            project_start_date: client.project_start_date,
            project_delivery_date: client.project_delivery_date,
            progress: client.project_status.progress_report(),
        }
    }

    // =========================================================================
    //  ACESSO AO PORTAL E ENTREGÁVEIS
    // =========================================================================

    pub async fn list_portal_users(&self, client_id: Uuid) -> Result<Vec<User>, AppError> {
        // Garante o 404 certo antes de listar
        self.get_client(client_id).await?;
        self.user_repo.list_by_client(client_id).await
    }

    /// Dá a um usuário já registrado acesso ao portal deste cliente.
    pub async fn link_portal_user(&self, client_id: Uuid, email: &str) -> Result<User, AppError> {
        self.get_client(client_id).await?;

        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let mut tx = self.pool.begin().await?;

        let linked = self
            .client_repo
            .link_user(&mut *tx, client_id, user.id)
            .await?;

        // Vínculo repetido é no-op: sem atividade duplicada no log
        if linked > 0 {
            self.activity_repo
                .append(
                    &mut *tx,
                    client_id,
                    ActivityType::AccountCreated,
                    "Portal access granted",
                    &format!("{} can now sign in to the client portal", user.email),
                )
                .await?;
        }

        tx.commit().await?;

        Ok(user)
    }

    /// Registra um entregável enviado ao cliente (o arquivo em si mora no
    /// storage externo; aqui só os metadados).
    pub async fn register_asset(
        &self,
        client_id: Uuid,
        payload: &RegisterAssetPayload,
    ) -> Result<ClientAsset, AppError> {
        self.get_client(client_id).await?;

        let mut tx = self.pool.begin().await?;

        let asset = self
            .client_repo
            .create_asset(
                &mut *tx,
                client_id,
                &payload.file_name,
                &payload.file_type,
                &payload.file_url,
            )
            .await?;

        if payload.file_type.starts_with("video") {
            self.activity_repo
                .append(
                    &mut *tx,
                    client_id,
                    ActivityType::VideoUploaded,
                    "New video uploaded",
                    &format!("{} was added to your library", payload.file_name),
                )
                .await?;
        }

        tx.commit().await?;

        Ok(asset)
    }
}
