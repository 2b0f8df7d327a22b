// src/services/dashboard_service.rs

use sqlx::{Executor, Postgres};

use crate::{common::error::AppError, db::DashboardRepository, models::dashboard::DashboardStats};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_stats<'e, E>(&self, executor: E) -> Result<DashboardStats, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_stats(executor).await
    }
}
