// src/db/commission_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{common::error::AppError, models::commission::CommissionRow};

const PROFILE_JOIN: &str = r#"
    SELECT s.*, p.full_name AS profile_full_name, p.email AS profile_email, p.role AS profile_role
    FROM s LEFT JOIN profiles p ON p.id = s.user_id
"#;

#[derive(Clone, Default)]
pub struct CommissionRepository;

impl CommissionRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, user_id: Option<Uuid>) -> Result<Vec<CommissionRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT s.*, p.full_name AS profile_full_name, p.email AS profile_email, p.role AS profile_role
            FROM commission_settings s LEFT JOIN profiles p ON p.id = s.user_id
            WHERE TRUE
            "#,
        );
        if let Some(user_id) = user_id {
            query.push(" AND s.user_id = ").push_bind(user_id);
        }
        query.push(" ORDER BY s.created_at DESC");

        let settings = query.build_query_as::<CommissionRow>().fetch_all(executor).await?;
        Ok(settings)
    }

    pub async fn exists_for_user<'e, E>(&self, executor: E, user_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM commission_settings WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    pub async fn create<'e, E>(&self, executor: E, user_id: Uuid, percentage: Decimal) -> Result<CommissionRow, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH s AS (
                INSERT INTO commission_settings (user_id, commission_percentage)
                VALUES ($1, $2)
                RETURNING *
            )
            {PROFILE_JOIN}
            "#
        );

        let setting = sqlx::query_as::<_, CommissionRow>(&sql)
            .bind(user_id)
            .bind(percentage)
            .fetch_one(executor)
            .await?;
        Ok(setting)
    }

    pub async fn update_by_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        percentage: Decimal,
    ) -> Result<Option<CommissionRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH s AS (
                UPDATE commission_settings
                SET commission_percentage = $2, updated_at = NOW()
                WHERE user_id = $1
                RETURNING *
            )
            {PROFILE_JOIN}
            "#
        );

        let setting = sqlx::query_as::<_, CommissionRow>(&sql)
            .bind(user_id)
            .bind(percentage)
            .fetch_optional(executor)
            .await?;
        Ok(setting)
    }

    pub async fn delete_by_user<'e, E>(&self, executor: E, user_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM commission_settings WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_users<'e, E>(&self, executor: E, user_ids: &[Uuid]) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM commission_settings WHERE user_id = ANY($1)")
            .bind(user_ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
