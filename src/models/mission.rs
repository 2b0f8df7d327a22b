// src/models/mission.rs

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE mission_status do banco. Qualquer transição é aceita.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "mission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Paid,
}

impl FromStr for MissionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(MissionStatus::Pending),
            "in_progress" => Ok(MissionStatus::InProgress),
            "completed" => Ok(MissionStatus::Completed),
            "paid" => Ok(MissionStatus::Paid),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Mission {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub deadline: Option<NaiveDate>,
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    #[schema(value_type = f64)]
    pub advance_amount: Decimal,
    pub status: MissionStatus,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientSummary {
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
}

// Linha do SELECT com LEFT JOIN em clients
#[derive(Debug, FromRow)]
pub struct MissionRow {
    #[sqlx(flatten)]
    pub mission: Mission,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_company: Option<String>,
}

/// Missão com o resumo do cliente, como sai na API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MissionWithClient {
    #[serde(flatten)]
    pub mission: Mission,
    pub client: Option<ClientSummary>,
}

impl From<MissionRow> for MissionWithClient {
    fn from(row: MissionRow) -> Self {
        let client = row.client_name.map(|name| ClientSummary {
            name,
            email: row.client_email,
            company: row.client_company,
        });
        Self {
            mission: row.mission,
            client,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissionData {
    pub title: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub deadline: Option<NaiveDate>,
    pub total_amount: Decimal,
    pub advance_amount: Decimal,
    pub status: MissionStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissionChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub client_id: Option<Uuid>,
    pub deadline: Option<Option<NaiveDate>>,
    pub total_amount: Option<Decimal>,
    pub advance_amount: Option<Decimal>,
    pub status: Option<MissionStatus>,
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct MissionFilter {
    pub status: Option<MissionStatus>,
    pub client_id: Option<Uuid>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        assert_eq!(serde_json::to_value(MissionStatus::InProgress).unwrap(), "in_progress");
        assert_eq!("paid".parse::<MissionStatus>(), Ok(MissionStatus::Paid));
        assert!("cancelled".parse::<MissionStatus>().is_err());
        assert_eq!(MissionStatus::default(), MissionStatus::Pending);
    }

    #[test]
    fn client_summary_is_absent_when_join_found_nothing() {
        let now = Utc::now();
        let row = MissionRow {
            mission: Mission {
                id: Uuid::new_v4(),
                title: "Site".into(),
                description: None,
                client_id: Uuid::new_v4(),
                deadline: None,
                total_amount: Decimal::from(100),
                advance_amount: Decimal::ZERO,
                status: MissionStatus::Pending,
                notes: None,
                created_by: None,
                created_at: now,
                updated_at: now,
            },
            client_name: None,
            client_email: None,
            client_company: None,
        };

        let value = serde_json::to_value(MissionWithClient::from(row)).unwrap();
        assert_eq!(value["title"], "Site");
        assert!(value["client"].is_null());
    }
}
