// src/db/client_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{
        Client, ClientAsset, ClientIntake, ClientListEntry, CreateClientPayload, ProjectStatus,
        UpdateClientPayload,
    },
    models::dashboard::PortalClientSummary,
};

// Lista de colunas compartilhada entre as consultas para evitar repetição.
const CLIENT_COLUMNS: &str = "id, business_name, contact_name, email, phone, website, niche, tone, \
    goals, notes, payment_status, payment_amount, payment_date, payment_method, package, \
    package_price, is_subscription, project_status, project_start_date, project_delivery_date, \
    avatar_id, voice_id, created_at, updated_at";

const INTAKE_COLUMNS: &str = "id, client_id, raw_faqs, raw_offers, raw_testimonials, raw_promos, \
    brand_voice_notes, reference_links, brand_colors, logo_url, created_at, updated_at";

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    /// Cria o cliente. Roda dentro da transação do serviço, junto com o intake.
    pub async fn create_client<'e, E>(
        &self,
        executor: E,
        payload: &CreateClientPayload,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO clients (business_name, contact_name, email, phone, website, niche, tone, goals, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {CLIENT_COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(&payload.business_name)
            .bind(&payload.contact_name)
            .bind(&payload.email)
            .bind(payload.phone.as_deref())
            .bind(payload.website.as_deref())
            .bind(&payload.niche)
            .bind(&payload.tone)
            .bind(&payload.goals)
            .bind(payload.notes.as_deref())
            .fetch_one(executor)
            .await?;

        Ok(client)
    }

    pub async fn create_intake<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        payload: &CreateClientPayload,
    ) -> Result<ClientIntake, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO client_intake (client_id, raw_faqs, raw_offers, raw_testimonials, raw_promos, \
                brand_voice_notes, reference_links, brand_colors, logo_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {INTAKE_COLUMNS}"
        );
        let intake = sqlx::query_as::<_, ClientIntake>(&query)
            .bind(client_id)
            .bind(&payload.raw_faqs)
            .bind(&payload.raw_offers)
            .bind(&payload.raw_testimonials)
            .bind(&payload.raw_promos)
            .bind(&payload.brand_voice_notes)
            .bind(&payload.reference_links)
            .bind(payload.brand_colors.as_deref())
            .bind(payload.logo_url.as_deref())
            .fetch_one(executor)
            .await?;

        Ok(intake)
    }

    /// Listagem do admin, com a contagem de roteiros de cada cliente.
    pub async fn list_clients(&self) -> Result<Vec<ClientListEntry>, AppError> {
        let query = format!(
            "SELECT {CLIENT_COLUMNS},
                (SELECT COUNT(*) FROM scripts s WHERE s.client_id = clients.id) AS script_count
             FROM clients
             ORDER BY created_at DESC"
        );
        let clients = sqlx::query_as::<_, ClientListEntry>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(clients)
    }

    pub async fn find_by_id(&self, client_id: Uuid) -> Result<Option<Client>, AppError> {
        let query = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1");
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    pub async fn find_intake(&self, client_id: Uuid) -> Result<Option<ClientIntake>, AppError> {
        let query = format!("SELECT {INTAKE_COLUMNS} FROM client_intake WHERE client_id = $1");
        let intake = sqlx::query_as::<_, ClientIntake>(&query)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(intake)
    }

    /// Atualização parcial: campos ausentes mantêm o valor atual (COALESCE).
    pub async fn update_client(
        &self,
        client_id: Uuid,
        payload: &UpdateClientPayload,
    ) -> Result<Option<Client>, AppError> {
        let query = format!(
            "UPDATE clients SET
                business_name  = COALESCE($2, business_name),
                contact_name   = COALESCE($3, contact_name),
                email          = COALESCE($4, email),
                phone          = COALESCE($5, phone),
                website        = COALESCE($6, website),
                niche          = COALESCE($7, niche),
                tone           = COALESCE($8, tone),
                goals          = COALESCE($9, goals),
                notes          = COALESCE($10, notes),
                payment_status = COALESCE($11, payment_status),
                payment_amount = COALESCE($12, payment_amount),
                payment_date   = COALESCE($13, payment_date),
                payment_method = COALESCE($14, payment_method),
                updated_at     = NOW()
             WHERE id = $1
             RETURNING {CLIENT_COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(client_id)
            .bind(payload.business_name.as_deref())
            .bind(payload.contact_name.as_deref())
            .bind(payload.email.as_deref())
            .bind(payload.phone.as_deref())
            .bind(payload.website.as_deref())
            .bind(payload.niche.as_deref())
            .bind(payload.tone.as_deref())
            .bind(payload.goals.as_deref())
            .bind(payload.notes.as_deref())
            .bind(payload.payment_status.as_deref())
            .bind(payload.payment_amount)
            .bind(payload.payment_date)
            .bind(payload.payment_method.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Muda o estágio do projeto, carimbando as datas quando o serviço mandar.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        status: ProjectStatus,
        start_date: Option<DateTime<Utc>>,
        delivery_date: Option<DateTime<Utc>>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "UPDATE clients SET
                project_status        = $2,
                project_start_date    = COALESCE($3, project_start_date),
                project_delivery_date = COALESCE($4, project_delivery_date),
                updated_at            = NOW()
             WHERE id = $1
             RETURNING {CLIENT_COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(client_id)
            .bind(status)
            .bind(start_date)
            .bind(delivery_date)
            .fetch_one(executor)
            .await?;

        Ok(client)
    }

    pub async fn delete_client(&self, client_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  ACESSO AO PORTAL (client_users)
    // =========================================================================

    /// Todos os clientes que o usuário autenticado pode ver no portal.
    pub async fn client_ids_for_user(&self, user_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT client_id FROM client_users WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    pub async fn summaries_for_user(
        &self,
        client_ids: &[Uuid],
    ) -> Result<Vec<PortalClientSummary>, AppError> {
        let summaries = sqlx::query_as::<_, PortalClientSummary>(
            "SELECT id, business_name, contact_name, email, niche, tone, project_status, \
                voice_id, avatar_id, package, payment_status, project_start_date, project_delivery_date
             FROM clients
             WHERE id = ANY($1)
             ORDER BY created_at ASC",
        )
        .bind(client_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Vincula um usuário do portal ao cliente. Idempotente.
    pub async fn link_user<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "INSERT INTO client_users (client_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(client_id)
        .bind(user_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  ASSETS (entregáveis)
    // =========================================================================

    pub async fn create_asset<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        file_name: &str,
        file_type: &str,
        file_url: &str,
    ) -> Result<ClientAsset, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asset = sqlx::query_as::<_, ClientAsset>(
            "INSERT INTO client_assets (client_id, file_name, file_type, file_url)
             VALUES ($1, $2, $3, $4)
             RETURNING id, client_id, file_name, file_type, file_url, uploaded_at",
        )
        .bind(client_id)
        .bind(file_name)
        .bind(file_type)
        .bind(file_url)
        .fetch_one(executor)
        .await?;

        Ok(asset)
    }

    /// Vídeos entregues aos clientes do usuário, mais recentes primeiro.
    pub async fn list_video_assets(
        &self,
        client_ids: &[Uuid],
    ) -> Result<Vec<ClientAsset>, AppError> {
        let assets = sqlx::query_as::<_, ClientAsset>(
            "SELECT id, client_id, file_name, file_type, file_url, uploaded_at
             FROM client_assets
             WHERE client_id = ANY($1) AND file_type LIKE 'video%'
             ORDER BY uploaded_at DESC",
        )
        .bind(client_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(assets)
    }
}
