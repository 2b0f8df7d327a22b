// src/services/client_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClientRepository,
    models::{
        auth::OwnerScope,
        client::{Client, ClientChanges, ClientData},
    },
};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
}

impl ClientService {
    pub fn new(repo: ClientRepository) -> Self {
        Self { repo }
    }

    pub async fn list<'e, E>(&self, executor: E, search: Option<&str>) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list(executor, search).await
    }

    pub async fn create<'e, E>(&self, executor: E, data: &ClientData, owner: OwnerScope) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = self.repo.create(executor, data, owner.created_by()).await?;
        tracing::info!("Cliente criado: {} ({})", client.name, client.id);
        Ok(client)
    }

    // Dono diferente responde igual a id inexistente.
    pub async fn replace<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        data: &ClientData,
        owner: OwnerScope,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .replace(executor, id, data, owner)
            .await?
            .ok_or(AppError::NotFound("client_not_found"))
    }

    pub async fn update_partial<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: &ClientChanges,
        owner: OwnerScope,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_partial(executor, id, changes, owner)
            .await?
            .ok_or(AppError::NotFound("client_not_found"))
    }

    pub async fn archive<'e, E>(&self, executor: E, id: Uuid, owner: OwnerScope) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = self
            .repo
            .archive(executor, id, owner)
            .await?
            .ok_or(AppError::NotFound("client_not_found"))?;
        tracing::info!("Cliente arquivado: {}", client.id);
        Ok(client)
    }
}
