// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erro de domínio. Os handlers convertem para `ApiError` na borda,
// já com a mensagem traduzida para o idioma da requisição.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Campo obrigatório ausente: {0}")]
    MissingField(&'static str),

    #[error("Campo inválido: {field} ({reason})")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    // Token ausente, expirado ou forjado: tudo cai aqui, de propósito sem distinção.
    #[error("Autenticação necessária")]
    Unauthenticated,

    // A chave i18n do recurso (ex: "client_not_found")
    #[error("Recurso não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Conflito: {0}")]
    Conflict(&'static str),

    #[error("Limite de requisições excedido ({key})")]
    RateLimited {
        key: &'static str,
        retry_after_secs: u64,
    },

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que vai para o fio.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
    pub retry_after: Option<u64>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
            retry_after: None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MissingField(_)
            | AppError::InvalidField { .. }
            | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::DatabaseError(e) if is_numeric_out_of_range(e) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let status = self.status();

        match self {
            // Devolve todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| {
                            let code = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            i18n.translate(lang, &format!("reason.{code}"))
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status,
                    error: i18n.translate(lang, "validation_failed"),
                    details: Some(json!(details)),
                    retry_after: None,
                }
            }
            AppError::MissingField(field) => ApiError {
                status,
                error: i18n.translate_with(lang, "field_required", &[("field", field)]),
                details: Some(json!({ "field": field })),
                retry_after: None,
            },
            AppError::InvalidField { field, reason } => {
                let reason_text = i18n.translate(lang, &format!("reason.{reason}"));
                ApiError {
                    status,
                    error: i18n.translate_with(
                        lang,
                        "field_invalid",
                        &[("field", field), ("reason", &reason_text)],
                    ),
                    details: Some(json!({ "field": field, "reason": reason })),
                    retry_after: None,
                }
            }
            AppError::InvalidBody(reason) => {
                tracing::debug!("Corpo rejeitado: {}", reason);
                ApiError::new(status, i18n.translate(lang, "invalid_body"))
            }
            AppError::InvalidCredentials => {
                ApiError::new(status, i18n.translate(lang, "invalid_credentials"))
            }
            AppError::Unauthenticated => {
                ApiError::new(status, i18n.translate(lang, "authentication_required"))
            }
            AppError::NotFound(key) | AppError::Conflict(key) => {
                ApiError::new(status, i18n.translate(lang, key))
            }
            AppError::RateLimited {
                key,
                retry_after_secs,
            } => ApiError {
                status,
                error: i18n.translate(lang, key),
                details: None,
                retry_after: Some(retry_after_secs),
            },

            // Número que não cabe na coluna: erro do cliente, não do servidor.
            AppError::DatabaseError(ref e) if is_numeric_out_of_range(e) => {
                tracing::debug!("Valor numérico fora do intervalo: {:?}", e);
                ApiError::new(status, i18n.translate(lang, "numeric_out_of_range"))
            }

            // Banco, bcrypt, jwt e afins: loga o detalhe, devolve mensagem genérica.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                ApiError::new(status, i18n.translate(lang, "internal_error"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.error });
        if let Some(details) = self.details {
            body["details"] = details;
        }

        let mut response = (self.status, Json(body)).into_response();
        if let Some(secs) = self.retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

// Códigos SQLSTATE que tratamos explicitamente
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNDEFINED_TABLE: &str = "42P01";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION))
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION))
}

pub fn is_numeric_out_of_range(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE))
}

/// A tabela `notes` (e outras opcionais) pode não existir em todos os ambientes.
pub fn is_missing_table(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNDEFINED_TABLE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn missing_field_is_bad_request_and_names_the_field() {
        let store = I18nStore::new();
        let api = AppError::MissingField("name").to_api_error(&en(), &store);

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert!(api.error.contains("name"), "message was: {}", api.error);
    }

    #[test]
    fn auth_failures_share_one_message() {
        let store = I18nStore::new();
        let a = AppError::Unauthenticated.to_api_error(&en(), &store);
        let b = AppError::Unauthenticated.to_api_error(&en(), &store);

        assert_eq!(a.status, StatusCode::UNAUTHORIZED);
        assert_eq!(a.error, b.error);
    }

    #[test]
    fn database_errors_are_hidden_behind_a_generic_message() {
        let store = I18nStore::new();
        let api = AppError::DatabaseError(sqlx::Error::RowNotFound).to_api_error(&en(), &store);

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.to_lowercase().contains("row"));
    }

    #[test]
    fn rate_limited_carries_retry_after_header() {
        let store = I18nStore::new();
        let response = AppError::RateLimited {
            key: "too_many_requests",
            retry_after_secs: 42,
        }
        .to_api_error(&en(), &store)
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");
    }

    #[test]
    fn conflict_maps_to_409() {
        assert_eq!(AppError::Conflict("objective_exists").status(), StatusCode::CONFLICT);
    }
}
