// src/db/profile_repo.rs

use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::Role,
        profile::{Profile, ProfileChanges, ProfileFilter},
    },
};

#[derive(Clone, Default)]
pub struct ProfileRepository;

impl ProfileRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &ProfileFilter) -> Result<Vec<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM profiles WHERE TRUE");

        if let Some(role) = filter.role {
            query.push(" AND role = ").push_bind(role);
        }
        if let Some(user_id) = filter.user_id {
            query.push(" AND id = ").push_bind(user_id);
        }
        query.push(" ORDER BY created_at DESC");

        let profiles = query.build_query_as::<Profile>().fetch_all(executor).await?;
        Ok(profiles)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(profile)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<Option<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE profiles SET updated_at = NOW()");

        if let Some(full_name) = &changes.full_name {
            query.push(", full_name = ").push_bind(full_name.clone());
        }
        if let Some(role) = changes.role {
            query.push(", role = ").push_bind(role);
        }
        query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        let profile = query.build_query_as::<Profile>().fetch_optional(executor).await?;
        Ok(profile)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Cria ou atualiza o perfil pelo id (perfis de demo e o perfil do admin).
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        email: &str,
        full_name: Option<&str>,
        role: Role,
    ) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, email, full_name, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET email = EXCLUDED.email, full_name = EXCLUDED.full_name,
                role = EXCLUDED.role, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(full_name)
        .bind(role)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    pub async fn ids_by_email_suffix<'e, E>(&self, executor: E, suffix: &str) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM profiles WHERE email LIKE $1")
            .bind(format!("%{suffix}"))
            .fetch_all(executor)
            .await?;
        Ok(ids)
    }

    pub async fn delete_by_email_suffix<'e, E>(&self, executor: E, suffix: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM profiles WHERE email LIKE $1")
            .bind(format!("%{suffix}"))
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
