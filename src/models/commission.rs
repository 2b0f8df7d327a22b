// src/models/commission.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::auth::Role;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CommissionSetting {
    pub id: Uuid,
    pub user_id: Uuid,
    /// 0..=100
    #[schema(value_type = f64, example = 8.5)]
    pub commission_percentage: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileSummary {
    pub full_name: Option<String>,
    pub email: String,
    pub role: Role,
}

// Linha do SELECT com LEFT JOIN em profiles
#[derive(Debug, FromRow)]
pub struct CommissionRow {
    #[sqlx(flatten)]
    pub setting: CommissionSetting,
    pub profile_full_name: Option<String>,
    pub profile_email: Option<String>,
    pub profile_role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommissionWithProfile {
    #[serde(flatten)]
    pub setting: CommissionSetting,
    pub profile: Option<ProfileSummary>,
}

impl From<CommissionRow> for CommissionWithProfile {
    fn from(row: CommissionRow) -> Self {
        let profile = match (row.profile_email, row.profile_role) {
            (Some(email), Some(role)) => Some(ProfileSummary {
                full_name: row.profile_full_name,
                email,
                role,
            }),
            _ => None,
        };
        Self {
            setting: row.setting,
            profile,
        }
    }
}
