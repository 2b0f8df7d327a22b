// src/db/note_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::note::Note};

#[derive(Clone, Default)]
pub struct NoteRepository;

impl NoteRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        client_id: Option<Uuid>,
        mission_id: Option<Uuid>,
        content: &str,
        is_important: bool,
        created_by: Option<Uuid>,
    ) -> Result<Note, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (client_id, mission_id, content, is_important, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(mission_id)
        .bind(content)
        .bind(is_important)
        .bind(created_by)
        .fetch_one(executor)
        .await?;

        Ok(note)
    }

    pub async fn delete_unowned<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM notes WHERE created_by IS NULL")
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
