// src/models/objective.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Objective {
    pub id: Uuid,
    /// "01".."12"
    #[schema(example = "03")]
    pub month: String,
    pub year: i32,
    pub target_missions: i32,
    #[schema(value_type = f64)]
    pub target_revenue: Decimal,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveData {
    pub month: String,
    pub year: i32,
    pub target_missions: i32,
    pub target_revenue: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectiveFilter {
    pub year: Option<i32>,
    pub month: Option<String>,
    pub user_id: Option<Uuid>,
}
