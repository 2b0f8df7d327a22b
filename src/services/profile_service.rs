// src/services/profile_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{is_foreign_key_violation, AppError},
    db::ProfileRepository,
    models::{
        auth::Role,
        profile::{Profile, ProfileChanges, ProfileFilter},
    },
};

#[derive(Clone)]
pub struct ProfileService {
    repo: ProfileRepository,
}

impl ProfileService {
    pub fn new(repo: ProfileRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &PgPool, filter: &ProfileFilter) -> Result<Vec<Profile>, AppError> {
        self.repo.list(pool, filter).await
    }

    pub async fn get(&self, pool: &PgPool, id: Uuid) -> Result<Profile, AppError> {
        self.repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("profile_not_found"))
    }

    pub async fn update(&self, pool: &PgPool, id: Uuid, changes: &ProfileChanges) -> Result<Profile, AppError> {
        self.repo
            .update(pool, id, changes)
            .await?
            .ok_or(AppError::NotFound("profile_not_found"))
    }

    pub async fn delete(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(pool, id).await.map_err(|err| match err {
            // Ainda é created_by de clientes/missões/objetivos
            AppError::DatabaseError(ref e) if is_foreign_key_violation(e) => AppError::Conflict("profile_in_use"),
            other => other,
        })?;

        match deleted {
            0 => Err(AppError::NotFound("profile_not_found")),
            _ => Ok(()),
        }
    }

    /// Garante o perfil do administrador para que `created_by` resolva.
    pub async fn ensure_admin_profile(&self, pool: &PgPool, id: Uuid, email: &str, username: &str) -> Result<Profile, AppError> {
        let profile = self.repo.upsert(pool, id, email, Some(username), Role::Admin).await?;
        tracing::info!("👤 Perfil do administrador pronto: {} ({})", profile.email, profile.id);
        Ok(profile)
    }
}
