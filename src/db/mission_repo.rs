// src/db/mission_repo.rs

use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::contains_pattern,
    models::mission::{MissionChanges, MissionData, MissionFilter, MissionRow},
};

// Colunas do resumo do cliente que acompanham cada missão
const CLIENT_JOIN: &str = r#"
    SELECT m.*, c.name AS client_name, c.email AS client_email, c.company AS client_company
    FROM m LEFT JOIN clients c ON c.id = m.client_id
"#;

#[derive(Clone, Default)]
pub struct MissionRepository;

impl MissionRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &MissionFilter) -> Result<Vec<MissionRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT m.*, c.name AS client_name, c.email AS client_email, c.company AS client_company
            FROM missions m LEFT JOIN clients c ON c.id = m.client_id
            WHERE TRUE
            "#,
        );

        if let Some(status) = filter.status {
            query.push(" AND m.status = ").push_bind(status);
        }
        if let Some(client_id) = filter.client_id {
            query.push(" AND m.client_id = ").push_bind(client_id);
        }
        if let Some(term) = &filter.search {
            let pattern = contains_pattern(term);
            query
                .push(" AND (m.title ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\' OR m.description ILIKE ")
                .push_bind(pattern)
                .push(r" ESCAPE '\')");
        }
        query.push(" ORDER BY m.created_at DESC");

        let missions = query.build_query_as::<MissionRow>().fetch_all(executor).await?;
        Ok(missions)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        data: &MissionData,
        created_by: Option<Uuid>,
    ) -> Result<MissionRow, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH m AS (
                INSERT INTO missions (
                    title, description, client_id, deadline, total_amount,
                    advance_amount, status, notes, created_by
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
            )
            {CLIENT_JOIN}
            "#
        );

        let mission = sqlx::query_as::<_, MissionRow>(&sql)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.client_id)
            .bind(data.deadline)
            .bind(data.total_amount)
            .bind(data.advance_amount)
            .bind(data.status)
            .bind(&data.notes)
            .bind(created_by)
            .fetch_one(executor)
            .await?;

        Ok(mission)
    }

    pub async fn replace<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        data: &MissionData,
    ) -> Result<Option<MissionRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH m AS (
                UPDATE missions
                SET title = $1, description = $2, client_id = $3, deadline = $4,
                    total_amount = $5, advance_amount = $6, status = $7, notes = $8,
                    updated_at = NOW()
                WHERE id = $9
                RETURNING *
            )
            {CLIENT_JOIN}
            "#
        );

        let mission = sqlx::query_as::<_, MissionRow>(&sql)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.client_id)
            .bind(data.deadline)
            .bind(data.total_amount)
            .bind(data.advance_amount)
            .bind(data.status)
            .bind(&data.notes)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(mission)
    }

    pub async fn update_partial<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: &MissionChanges,
    ) -> Result<Option<MissionRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query = QueryBuilder::<Postgres>::new("WITH m AS (UPDATE missions SET updated_at = NOW()");

        if let Some(title) = &changes.title {
            query.push(", title = ").push_bind(title.clone());
        }
        if let Some(description) = &changes.description {
            query.push(", description = ").push_bind(description.clone());
        }
        if let Some(client_id) = changes.client_id {
            query.push(", client_id = ").push_bind(client_id);
        }
        if let Some(deadline) = changes.deadline {
            query.push(", deadline = ").push_bind(deadline);
        }
        if let Some(total_amount) = changes.total_amount {
            query.push(", total_amount = ").push_bind(total_amount);
        }
        if let Some(advance_amount) = changes.advance_amount {
            query.push(", advance_amount = ").push_bind(advance_amount);
        }
        if let Some(status) = changes.status {
            query.push(", status = ").push_bind(status);
        }
        if let Some(notes) = &changes.notes {
            query.push(", notes = ").push_bind(notes.clone());
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING *)");
        query.push(CLIENT_JOIN);

        let mission = query.build_query_as::<MissionRow>().fetch_optional(executor).await?;
        Ok(mission)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_unowned<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM missions
            WHERE created_by IS NULL
              AND NOT EXISTS (SELECT 1 FROM notes n WHERE n.mission_id = missions.id)
            "#,
        )
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
