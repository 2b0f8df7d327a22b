// src/services/mission_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{is_foreign_key_violation, AppError},
    db::MissionRepository,
    models::{
        auth::OwnerScope,
        mission::{MissionChanges, MissionData, MissionFilter, MissionWithClient},
    },
};

// client_id apontando para cliente inexistente vira erro de campo.
fn unknown_client(err: AppError) -> AppError {
    match err {
        AppError::DatabaseError(ref e) if is_foreign_key_violation(e) => AppError::InvalidField {
            field: "client_id",
            reason: "unknown_client",
        },
        other => other,
    }
}

#[derive(Clone)]
pub struct MissionService {
    repo: MissionRepository,
}

impl MissionService {
    pub fn new(repo: MissionRepository) -> Self {
        Self { repo }
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &MissionFilter) -> Result<Vec<MissionWithClient>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = self.repo.list(executor, filter).await?;
        Ok(rows.into_iter().map(MissionWithClient::from).collect())
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        data: &MissionData,
        owner: OwnerScope,
    ) -> Result<MissionWithClient, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = self
            .repo
            .create(executor, data, owner.created_by())
            .await
            .map_err(unknown_client)?;
        tracing::info!("Missão criada: {} ({})", row.mission.title, row.mission.id);
        Ok(row.into())
    }

    pub async fn replace<'e, E>(&self, executor: E, id: Uuid, data: &MissionData) -> Result<MissionWithClient, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .replace(executor, id, data)
            .await
            .map_err(unknown_client)?
            .map(MissionWithClient::from)
            .ok_or(AppError::NotFound("mission_not_found"))
    }

    pub async fn update_partial<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: &MissionChanges,
    ) -> Result<MissionWithClient, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_partial(executor, id, changes)
            .await
            .map_err(unknown_client)?
            .map(MissionWithClient::from)
            .ok_or(AppError::NotFound("mission_not_found"))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        match self.repo.delete(executor, id).await? {
            0 => Err(AppError::NotFound("mission_not_found")),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_errors_pass_through() {
        let err = unknown_client(AppError::NotFound("mission_not_found"));
        assert!(matches!(err, AppError::NotFound("mission_not_found")));
    }
}
