// src/db/dashboard_repo.rs

use sqlx::{Executor, Postgres};

use crate::{common::error::AppError, models::dashboard::DashboardStats};

#[derive(Clone, Default)]
pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self
    }

    // Um único SELECT: todos os números vêm do mesmo snapshot.
    pub async fn get_stats<'e, E>(&self, executor: E) -> Result<DashboardStats, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM clients WHERE archived = FALSE) AS total_clients,
                (SELECT COUNT(*) FROM missions) AS total_missions,
                (SELECT COUNT(*) FROM missions WHERE status = 'completed') AS completed_missions,
                (SELECT COUNT(*) FROM missions WHERE status = 'pending') AS pending_missions,
                (SELECT COALESCE(SUM(total_amount), 0) FROM missions) AS total_revenue,
                (SELECT COALESCE(SUM(total_amount), 0) FROM missions
                  WHERE created_at >= date_trunc('month', NOW())) AS this_month_revenue
            "#,
        )
        .fetch_one(executor)
        .await?;

        Ok(stats)
    }
}
