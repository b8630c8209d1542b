// src/db/activity_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::activity::{ActivityType, PortalActivity},
};

const ACTIVITY_COLUMNS: &str = "id, client_id, activity_type, title, description, created_at";

// Log append-only: este repositório só insere e lista. Não existe update
// nem delete de atividade em lugar nenhum do código.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn append<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        activity_type: ActivityType,
        title: &str,
        description: &str,
    ) -> Result<PortalActivity, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO portal_activity (client_id, activity_type, title, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {ACTIVITY_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, PortalActivity>(&query)
            .bind(client_id)
            .bind(activity_type)
            .bind(title)
            .bind(description)
            .fetch_one(executor)
            .await?;

        Ok(entry)
    }

    /// Entradas mais recentes dos clientes do usuário, para o dashboard.
    pub async fn recent_for_clients(
        &self,
        client_ids: &[Uuid],
        limit: i64,
    ) -> Result<Vec<PortalActivity>, AppError> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM portal_activity
             WHERE client_id = ANY($1)
             ORDER BY created_at DESC
             LIMIT $2"
        );
        let entries = sqlx::query_as::<_, PortalActivity>(&query)
            .bind(client_ids)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }
}
