// src/models/demo.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{auth::Role, mission::MissionStatus};

// --- Fixtures (ligadas por rótulo, nunca por posição) ---

pub struct ClientFixture {
    pub label: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub company: &'static str,
    pub notes: &'static str,
}

pub struct MissionFixture {
    pub label: &'static str,
    pub client: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub total_amount: i64,
    /// YYYY-MM-DD
    pub deadline: &'static str,
    pub status: MissionStatus,
}

pub struct ProfileFixture {
    pub id: u128,
    pub email: &'static str,
    pub full_name: &'static str,
    pub role: Role,
    pub commission_percentage: (i64, u32), // (mantissa, escala)
}

pub struct ObjectiveFixture {
    pub month: &'static str,
    pub year: i32,
    pub target_missions: i32,
    pub target_revenue: i64,
}

pub enum NoteTarget {
    Client(&'static str),
    Mission(&'static str),
}

pub struct NoteFixture {
    pub target: NoteTarget,
    pub content: &'static str,
    pub is_important: bool,
}

// --- Respostas ---

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DemoLoadSummary {
    pub clients: u64,
    pub missions: u64,
    pub profiles: u64,
    pub objectives: u64,
    pub commission_settings: u64,
    pub notes: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DemoClearSummary {
    pub notes: u64,
    pub commission_settings: u64,
    pub objectives: u64,
    pub missions: u64,
    pub clients: u64,
    pub profiles: u64,
}
