// src/services/script_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityRepository, ClientRepository, ScriptRepository},
    models::activity::ActivityType,
    models::script::{
        BulkUpdatePayload, BulkUpdateResponse, PortalReviewPayload, PortalReviewResponse,
        ReviewAction, Script, ScriptStatus, UpdateScriptPayload,
    },
};

#[derive(Clone)]
pub struct ScriptService {
    script_repo: ScriptRepository,
    client_repo: ClientRepository,
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl ScriptService {
    pub fn new(
        script_repo: ScriptRepository,
        client_repo: ClientRepository,
        activity_repo: ActivityRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            script_repo,
            client_repo,
            activity_repo,
            pool,
        }
    }

    // =========================================================================
    //  MÁQUINA DE REVISÃO (transições puras, testáveis sem banco)
    // =========================================================================

    /// Valida a transição pedida pelo cliente contra o estado atual.
    /// Regras: `exported` é terminal fora do caminho do admin; pedir revisão
    /// exige notas não vazias. Aprovar de novo um roteiro aprovado é no-op
    /// permitido (idempotência para retry).
    pub fn guard_client_transition(
        current: ScriptStatus,
        action: ReviewAction,
        notes: Option<&str>,
    ) -> Result<ScriptStatus, AppError> {
        if current == ScriptStatus::Exported {
            return Err(AppError::ScriptLocked);
        }

        match action {
            ReviewAction::Approve => Ok(ScriptStatus::Approved),
            ReviewAction::RequestRevision => {
                let has_notes = notes.map(|n| !n.trim().is_empty()).unwrap_or(false);
                if !has_notes {
                    return Err(AppError::InvalidPayload(
                        "Please describe the changes you would like.".to_string(),
                    ));
                }
                Ok(ScriptStatus::RevisionRequested)
            }
        }
    }

    /// Nota de revisão datada, prefixada ao histórico existente.
    pub fn revision_note(notes: &str, existing: Option<&str>) -> String {
        let today = Utc::now().format("%Y-%m-%d");
        format!(
            "[Revision Requested - {}]: {}\n\n{}",
            today,
            notes.trim(),
            existing.unwrap_or("")
        )
    }

    // =========================================================================
    //  PORTAL DO CLIENTE
    // =========================================================================

    /// Roteiro visível para o usuário do portal (posse verificada via
    /// client_users; roteiro alheio responde 404, nunca 403).
    pub async fn get_portal_script(
        &self,
        script_id: Uuid,
        user_id: Uuid,
    ) -> Result<Script, AppError> {
        let client_ids = self.client_repo.client_ids_for_user(user_id).await?;
        self.script_repo
            .find_for_clients(script_id, &client_ids)
            .await?
            .ok_or(AppError::ScriptNotFound)
    }

    pub async fn list_portal_scripts(&self, user_id: Uuid) -> Result<Vec<Script>, AppError> {
        let client_ids = self.client_repo.client_ids_for_user(user_id).await?;
        if client_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.script_repo.list_for_clients(&client_ids).await
    }

    /// Aprovação ou pedido de revisão vindo do portal.
    pub async fn review_script(
        &self,
        script_id: Uuid,
        user_id: Uuid,
        payload: &PortalReviewPayload,
    ) -> Result<PortalReviewResponse, AppError> {
        let script = self.get_portal_script(script_id, user_id).await?;

        let new_status =
            Self::guard_client_transition(script.status, payload.action, payload.notes.as_deref())?;

        let notes = match payload.action {
            ReviewAction::RequestRevision => Some(Self::revision_note(
                payload.notes.as_deref().unwrap_or(""),
                script.notes.as_deref(),
            )),
            ReviewAction::Approve => None,
        };

        let mut tx = self.pool.begin().await?;

        let updated = self
            .script_repo
            .update_review(&mut *tx, script.id, new_status, notes.as_deref())
            .await?;

        if payload.action == ReviewAction::Approve {
            self.activity_repo
                .append(
                    &mut *tx,
                    script.client_id,
                    ActivityType::ScriptApproved,
                    "Script approved",
                    &format!("\"{}\" is ready for video production", updated.title),
                )
                .await?;
        }

        tx.commit().await?;

        let message = match payload.action {
            ReviewAction::Approve => "Script approved successfully!".to_string(),
            ReviewAction::RequestRevision => {
                "Revision request submitted. Our team will update the script soon.".to_string()
            }
        };

        Ok(PortalReviewResponse {
            success: true,
            script: updated.into(),
            message,
        })
    }

    // =========================================================================
    //  ADMIN
    // =========================================================================

    pub async fn get_script(&self, script_id: Uuid) -> Result<Script, AppError> {
        self.script_repo
            .find_by_id(script_id)
            .await?
            .ok_or(AppError::ScriptNotFound)
    }

    /// Atualização do admin. Force-set de status é permitido aqui — é o
    /// único caminho de volta a partir de `exported` — mas o alvo fica
    /// restrito a draft/approved/exported; `revision_requested` só nasce
    /// da ação do cliente.
    pub async fn update_script(
        &self,
        script_id: Uuid,
        payload: &UpdateScriptPayload,
    ) -> Result<Script, AppError> {
        if payload.is_empty() {
            return Err(AppError::InvalidPayload("No valid fields to update".to_string()));
        }

        if let Some(status) = payload.status {
            if !status.is_admin_target() {
                return Err(AppError::InvalidPayload(
                    "Invalid status. Must be one of: draft, approved, exported".to_string(),
                ));
            }
        }

        self.script_repo
            .update_script(script_id, payload)
            .await?
            .ok_or(AppError::ScriptNotFound)
    }

    pub async fn delete_script(&self, script_id: Uuid) -> Result<(), AppError> {
        let deleted = self.script_repo.delete_script(script_id).await?;
        if deleted == 0 {
            return Err(AppError::ScriptNotFound);
        }
        Ok(())
    }

    /// Bulk update: um UPDATE só, idempotente. Ou aplica em tudo que
    /// existe e devolve a contagem, ou falha por inteiro.
    pub async fn bulk_update(
        &self,
        payload: &BulkUpdatePayload,
    ) -> Result<BulkUpdateResponse, AppError> {
        if payload.script_ids.is_empty() {
            return Err(AppError::InvalidPayload(
                "scriptIds must be a non-empty array".to_string(),
            ));
        }

        if !payload.status.is_admin_target() {
            return Err(AppError::InvalidPayload(
                "Invalid status. Must be one of: draft, approved, exported".to_string(),
            ));
        }

        let count = self
            .script_repo
            .bulk_update_status(&payload.script_ids, payload.status)
            .await?;

        tracing::info!(
            "📦 Bulk update: {} roteiro(s) para '{}'",
            count,
            payload.status.label()
        );

        Ok(BulkUpdateResponse {
            message: format!("Successfully updated {} script(s)", count),
            count,
            status: payload.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_moves_draft_to_approved() {
        let next =
            ScriptService::guard_client_transition(ScriptStatus::Draft, ReviewAction::Approve, None)
                .unwrap();
        assert_eq!(next, ScriptStatus::Approved);
    }

    #[test]
    fn approve_is_idempotent_on_approved_scripts() {
        let next = ScriptService::guard_client_transition(
            ScriptStatus::Approved,
            ReviewAction::Approve,
            None,
        )
        .unwrap();
        assert_eq!(next, ScriptStatus::Approved);
    }

    #[test]
    fn revision_requires_non_blank_notes() {
        for notes in [None, Some(""), Some("   \n\t ")] {
            let result = ScriptService::guard_client_transition(
                ScriptStatus::Draft,
                ReviewAction::RequestRevision,
                notes,
            );
            assert!(matches!(result, Err(AppError::InvalidPayload(_))));
        }
    }

    #[test]
    fn revision_with_notes_moves_to_revision_requested() {
        let next = ScriptService::guard_client_transition(
            ScriptStatus::Draft,
            ReviewAction::RequestRevision,
            Some("Please mention our weekend hours"),
        )
        .unwrap();
        assert_eq!(next, ScriptStatus::RevisionRequested);
    }

    #[test]
    fn exported_scripts_reject_any_client_action() {
        for (action, notes) in [
            (ReviewAction::Approve, None),
            (ReviewAction::RequestRevision, Some("tweak the hook")),
        ] {
            let result = ScriptService::guard_client_transition(
                ScriptStatus::Exported,
                action,
                notes,
            );
            assert!(matches!(result, Err(AppError::ScriptLocked)));
        }
    }

    #[test]
    fn revision_note_is_prefixed_to_existing_notes() {
        let note = ScriptService::revision_note("Shorter opening", Some("older feedback"));
        assert!(note.starts_with("[Revision Requested - "));
        assert!(note.contains("]: Shorter opening\n\nolder feedback"));
    }

    #[test]
    fn revision_note_without_history_keeps_format() {
        let note = ScriptService::revision_note("  Add pricing  ", None);
        assert!(note.contains("]: Add pricing\n\n"));
    }
}
