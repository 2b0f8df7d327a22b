// src/db/objective_repo.rs

use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::objective::{Objective, ObjectiveData, ObjectiveFilter},
};

#[derive(Clone, Default)]
pub struct ObjectiveRepository;

impl ObjectiveRepository {
    pub fn new() -> Self {
        Self
    }

    /// Mais recentes primeiro (ano, depois mês).
    pub async fn list<'e, E>(&self, executor: E, filter: &ObjectiveFilter) -> Result<Vec<Objective>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM objectives WHERE TRUE");

        if let Some(year) = filter.year {
            query.push(" AND year = ").push_bind(year);
        }
        if let Some(month) = &filter.month {
            query.push(" AND month = ").push_bind(month.clone());
        }
        if let Some(user_id) = filter.user_id {
            query.push(" AND created_by = ").push_bind(user_id);
        }
        query.push(" ORDER BY year DESC, month DESC, created_at DESC");

        let objectives = query.build_query_as::<Objective>().fetch_all(executor).await?;
        Ok(objectives)
    }

    pub async fn exists_for_owner<'e, E>(
        &self,
        executor: E,
        month: &str,
        year: i32,
        owner_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM objectives WHERE month = $1 AND year = $2 AND created_by = $3)",
        )
        .bind(month)
        .bind(year)
        .bind(owner_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        data: &ObjectiveData,
        created_by: Option<Uuid>,
    ) -> Result<Objective, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let objective = sqlx::query_as::<_, Objective>(
            r#"
            INSERT INTO objectives (month, year, target_missions, target_revenue, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.month)
        .bind(data.year)
        .bind(data.target_missions)
        .bind(data.target_revenue)
        .bind(created_by)
        .fetch_one(executor)
        .await?;

        Ok(objective)
    }

    pub async fn replace<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        data: &ObjectiveData,
    ) -> Result<Option<Objective>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let objective = sqlx::query_as::<_, Objective>(
            r#"
            UPDATE objectives
            SET month = $1, year = $2, target_missions = $3, target_revenue = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.month)
        .bind(data.year)
        .bind(data.target_missions)
        .bind(data.target_revenue)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(objective)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM objectives WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_owners<'e, E>(&self, executor: E, owner_ids: &[Uuid]) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM objectives WHERE created_by = ANY($1)")
            .bind(owner_ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
