// src/services/commission_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{is_foreign_key_violation, is_unique_violation, AppError},
    db::CommissionRepository,
    models::commission::CommissionWithProfile,
};

#[derive(Clone)]
pub struct CommissionService {
    repo: CommissionRepository,
}

impl CommissionService {
    pub fn new(repo: CommissionRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &PgPool, user_id: Option<Uuid>) -> Result<Vec<CommissionWithProfile>, AppError> {
        let rows = self.repo.list(pool, user_id).await?;
        Ok(rows.into_iter().map(CommissionWithProfile::from).collect())
    }

    // Um registro por usuário; o existente nunca é alterado aqui.
    pub async fn create(&self, pool: &PgPool, user_id: Uuid, percentage: Decimal) -> Result<CommissionWithProfile, AppError> {
        if self.repo.exists_for_user(pool, user_id).await? {
            return Err(AppError::Conflict("commission_exists"));
        }

        let row = self
            .repo
            .create(pool, user_id, percentage)
            .await
            .map_err(|err| match err {
                AppError::DatabaseError(ref e) if is_unique_violation(e) => AppError::Conflict("commission_exists"),
                AppError::DatabaseError(ref e) if is_foreign_key_violation(e) => AppError::InvalidField {
                    field: "user_id",
                    reason: "unknown_profile",
                },
                other => other,
            })?;

        Ok(row.into())
    }

    pub async fn update(&self, pool: &PgPool, user_id: Uuid, percentage: Decimal) -> Result<CommissionWithProfile, AppError> {
        self.repo
            .update_by_user(pool, user_id, percentage)
            .await?
            .map(CommissionWithProfile::from)
            .ok_or(AppError::NotFound("commission_not_found"))
    }

    pub async fn delete(&self, pool: &PgPool, user_id: Uuid) -> Result<(), AppError> {
        match self.repo.delete_by_user(pool, user_id).await? {
            0 => Err(AppError::NotFound("commission_not_found")),
            _ => Ok(()),
        }
    }
}
