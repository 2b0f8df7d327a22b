// src/services/objective_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{is_unique_violation, AppError},
    db::ObjectiveRepository,
    models::{
        auth::OwnerScope,
        objective::{Objective, ObjectiveData, ObjectiveFilter},
    },
};

fn duplicate_objective(err: AppError) -> AppError {
    match err {
        AppError::DatabaseError(ref e) if is_unique_violation(e) => AppError::Conflict("objective_exists"),
        other => other,
    }
}

#[derive(Clone)]
pub struct ObjectiveService {
    repo: ObjectiveRepository,
}

impl ObjectiveService {
    pub fn new(repo: ObjectiveRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &PgPool, filter: &ObjectiveFilter) -> Result<Vec<Objective>, AppError> {
        self.repo.list(pool, filter).await
    }

    /// Um objetivo por (mês, ano, dono). Sem dono (demo) não há checagem;
    /// o índice único também não barra NULLs.
    pub async fn create(&self, pool: &PgPool, data: &ObjectiveData, owner: OwnerScope) -> Result<Objective, AppError> {
        if let OwnerScope::Owner(owner_id) = owner {
            if self.repo.exists_for_owner(pool, &data.month, data.year, owner_id).await? {
                return Err(AppError::Conflict("objective_exists"));
            }
        }

        // A corrida entre a checagem e o INSERT cai no índice único.
        self.repo
            .create(pool, data, owner.created_by())
            .await
            .map_err(duplicate_objective)
    }

    pub async fn replace(&self, pool: &PgPool, id: Uuid, data: &ObjectiveData) -> Result<Objective, AppError> {
        self.repo
            .replace(pool, id, data)
            .await
            .map_err(duplicate_objective)?
            .ok_or(AppError::NotFound("objective_not_found"))
    }

    pub async fn delete(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        match self.repo.delete(pool, id).await? {
            0 => Err(AppError::NotFound("objective_not_found")),
            _ => Ok(()),
        }
    }
}
