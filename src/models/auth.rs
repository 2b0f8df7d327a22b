// src/models/auth.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE user_role do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Commercial,
    Developer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Commercial => "commercial",
            Role::Developer => "developer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "commercial" => Ok(Role::Commercial),
            "developer" => Ok(Role::Developer),
            _ => Err(()),
        }
    }
}

// Quem está logado. Só existe um administrador configurado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: Role,
    /// Epoch em milissegundos
    pub login_time: i64,
    /// Perfil dono dos registros criados por esta sessão (ADMIN_PROFILE_ID)
    pub profile_id: Option<Uuid>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub login_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<Uuid>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn into_identity(self) -> Identity {
        Identity {
            id: self.sub,
            username: self.username,
            role: self.role,
            login_time: self.login_time,
            profile_id: self.profile_id,
        }
    }
}

/// Dono resolvido de uma escrita.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    Owner(Uuid),
    /// DEMO_MODE sem perfil: grava `created_by = NULL` e não filtra por dono.
    Demo,
}

impl OwnerScope {
    pub fn resolve(identity: Option<&Identity>, demo_mode: bool) -> Option<Self> {
        match identity.and_then(|i| i.profile_id) {
            Some(profile_id) => Some(OwnerScope::Owner(profile_id)),
            None if demo_mode => Some(OwnerScope::Demo),
            None => None,
        }
    }

    pub fn created_by(&self) -> Option<Uuid> {
        match self {
            OwnerScope::Owner(id) => Some(*id),
            OwnerScope::Demo => None,
        }
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(required(message = "required"), length(min = 1, max = 50, message = "length_1_50"))]
    #[schema(example = "admin")]
    pub username: Option<String>,

    #[validate(required(message = "required"), length(min = 1, max = 100, message = "length_1_100"))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: Identity,
}
