// src/db/script_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::script::{Script, ScriptStatus, ScriptType, UpdateScriptPayload},
};

const SCRIPT_COLUMNS: &str = "id, client_id, script_type, title, script_text, duration_seconds, \
    status, notes, created_at, updated_at";

#[derive(Clone)]
pub struct ScriptRepository {
    pool: PgPool,
}

impl ScriptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere um roteiro recém-gerado. A geração do pacote chama isto em
    /// loop dentro de uma transação: ou entram os 30, ou nenhum.
    pub async fn insert_script<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        script_type: ScriptType,
        title: &str,
        script_text: &str,
        duration_seconds: i32,
    ) -> Result<Script, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO scripts (client_id, script_type, title, script_text, duration_seconds, status)
             VALUES ($1, $2, $3, $4, $5, 'draft')
             RETURNING {SCRIPT_COLUMNS}"
        );
        let script = sqlx::query_as::<_, Script>(&query)
            .bind(client_id)
            .bind(script_type)
            .bind(title)
            .bind(script_text)
            .bind(duration_seconds)
            .fetch_one(executor)
            .await?;

        Ok(script)
    }

    pub async fn find_by_id(&self, script_id: Uuid) -> Result<Option<Script>, AppError> {
        let query = format!("SELECT {SCRIPT_COLUMNS} FROM scripts WHERE id = $1");
        let script = sqlx::query_as::<_, Script>(&query)
            .bind(script_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(script)
    }

    /// Busca restrita aos clientes informados — é o guard de posse do portal:
    /// o roteiro de outro cliente simplesmente "não existe" para o usuário.
    pub async fn find_for_clients(
        &self,
        script_id: Uuid,
        client_ids: &[Uuid],
    ) -> Result<Option<Script>, AppError> {
        let query =
            format!("SELECT {SCRIPT_COLUMNS} FROM scripts WHERE id = $1 AND client_id = ANY($2)");
        let script = sqlx::query_as::<_, Script>(&query)
            .bind(script_id)
            .bind(client_ids)
            .fetch_optional(&self.pool)
            .await?;

        Ok(script)
    }

    /// Roteiros de um cliente, agrupáveis para exportação
    /// (categoria na ordem fixa, depois ordem de criação).
    pub async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Script>, AppError> {
        let query = format!(
            "SELECT {SCRIPT_COLUMNS} FROM scripts
             WHERE client_id = $1
             ORDER BY script_type ASC, created_at ASC"
        );
        let scripts = sqlx::query_as::<_, Script>(&query)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(scripts)
    }

    /// Todos os roteiros visíveis no portal do usuário, mais novos primeiro.
    pub async fn list_for_clients(&self, client_ids: &[Uuid]) -> Result<Vec<Script>, AppError> {
        let query = format!(
            "SELECT {SCRIPT_COLUMNS} FROM scripts
             WHERE client_id = ANY($1)
             ORDER BY created_at DESC"
        );
        let scripts = sqlx::query_as::<_, Script>(&query)
            .bind(client_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(scripts)
    }

    /// Atualização parcial do admin (título, texto, status, notas).
    pub async fn update_script(
        &self,
        script_id: Uuid,
        payload: &UpdateScriptPayload,
    ) -> Result<Option<Script>, AppError> {
        let query = format!(
            "UPDATE scripts SET
                title       = COALESCE($2, title),
                script_text = COALESCE($3, script_text),
                status      = COALESCE($4, status),
                notes       = COALESCE($5, notes),
                updated_at  = NOW()
             WHERE id = $1
             RETURNING {SCRIPT_COLUMNS}"
        );
        let script = sqlx::query_as::<_, Script>(&query)
            .bind(script_id)
            .bind(payload.title.as_deref())
            .bind(payload.script_text.as_deref())
            .bind(payload.status)
            .bind(payload.notes.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(script)
    }

    /// Transição de revisão vinda do portal: status + notas de uma vez.
    pub async fn update_review<'e, E>(
        &self,
        executor: E,
        script_id: Uuid,
        status: ScriptStatus,
        notes: Option<&str>,
    ) -> Result<Script, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "UPDATE scripts SET
                status     = $2,
                notes      = COALESCE($3, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SCRIPT_COLUMNS}"
        );
        let script = sqlx::query_as::<_, Script>(&query)
            .bind(script_id)
            .bind(status)
            .bind(notes)
            .fetch_one(executor)
            .await?;

        Ok(script)
    }

    /// Bulk update num único UPDATE: aplica tudo ou falha como unidade.
    /// Ids que não existem não entram na contagem.
    pub async fn bulk_update_status(
        &self,
        script_ids: &[Uuid],
        status: ScriptStatus,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE scripts SET status = $2, updated_at = NOW() WHERE id = ANY($1)",
        )
        .bind(script_ids)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_script(&self, script_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM scripts WHERE id = $1")
            .bind(script_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_by_client(&self, client_id: Uuid) -> Result<i64, AppError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM scripts WHERE client_id = $1")
                .bind(client_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
