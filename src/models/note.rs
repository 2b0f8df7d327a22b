// src/models/note.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Só é escrita pelo carregador de demo; não há rotas para notas.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub mission_id: Option<Uuid>,
    pub content: String,
    pub is_important: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
