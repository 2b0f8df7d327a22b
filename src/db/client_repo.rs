// src/db/client_repo.rs

use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::contains_pattern,
    models::{
        auth::OwnerScope,
        client::{Client, ClientChanges, ClientData},
    },
};

#[derive(Clone, Default)]
pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self
    }

    /// Clientes não arquivados, mais novos primeiro.
    pub async fn list<'e, E>(&self, executor: E, search: Option<&str>) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM clients WHERE archived = FALSE");

        if let Some(term) = search {
            let pattern = contains_pattern(term);
            query
                .push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\' OR email ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\' OR company ILIKE ")
                .push_bind(pattern)
                .push(r" ESCAPE '\')");
        }
        query.push(" ORDER BY created_at DESC");

        let clients = query.build_query_as::<Client>().fetch_all(executor).await?;
        Ok(clients)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        data: &ClientData,
        created_by: Option<Uuid>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, phone, company, notes, archived, created_by)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.company)
        .bind(&data.notes)
        .bind(created_by)
        .fetch_one(executor)
        .await?;

        Ok(client)
    }

    /// Substitui todos os campos editáveis. `None` se o id (ou o dono) não bate.
    pub async fn replace<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        data: &ClientData,
        owner: OwnerScope,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = $1, email = $2, phone = $3, company = $4, notes = $5, updated_at = NOW()
            WHERE id = $6 AND ($7::uuid IS NULL OR created_by = $7)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.company)
        .bind(&data.notes)
        .bind(id)
        .bind(owner.created_by())
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    /// PATCH: só as colunas presentes; `updated_at` sempre.
    pub async fn update_partial<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: &ClientChanges,
        owner: OwnerScope,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE clients SET updated_at = NOW()");

        if let Some(name) = &changes.name {
            query.push(", name = ").push_bind(name.clone());
        }
        if let Some(email) = &changes.email {
            query.push(", email = ").push_bind(email.clone());
        }
        if let Some(phone) = &changes.phone {
            query.push(", phone = ").push_bind(phone.clone());
        }
        if let Some(company) = &changes.company {
            query.push(", company = ").push_bind(company.clone());
        }
        if let Some(notes) = &changes.notes {
            query.push(", notes = ").push_bind(notes.clone());
        }
        if let Some(archived) = changes.archived {
            query.push(", archived = ").push_bind(archived);
        }

        query.push(" WHERE id = ").push_bind(id);
        if let Some(owner_id) = owner.created_by() {
            query.push(" AND created_by = ").push_bind(owner_id);
        }
        query.push(" RETURNING *");

        let client = query.build_query_as::<Client>().fetch_optional(executor).await?;
        Ok(client)
    }

    pub async fn archive<'e, E>(&self, executor: E, id: Uuid, owner: OwnerScope) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET archived = TRUE, updated_at = NOW()
            WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner.created_by())
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    /// Remove de vez os clientes sem dono (dados de demo). Cliente que ainda
    /// tem missão ou nota de alguém fica.
    pub async fn delete_unowned<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM clients
            WHERE created_by IS NULL
              AND NOT EXISTS (SELECT 1 FROM missions m WHERE m.client_id = clients.id)
              AND NOT EXISTS (SELECT 1 FROM notes n WHERE n.client_id = clients.id)
            "#,
        )
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
