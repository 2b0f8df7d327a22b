// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Os cards do topo do painel
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct DashboardStats {
    pub total_clients: i64, // não arquivados
    pub total_missions: i64,
    pub completed_missions: i64,
    pub pending_missions: i64,
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
    #[schema(value_type = f64)]
    pub this_month_revenue: Decimal,
}
