// src/handlers/clients.rs

use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateEmail};

use crate::{
    common::{
        error::{ApiError, AppError},
        input::{clean, deserialize_some, required_text, required_uuid},
        response::ApiResponse,
    },
    config::AppState,
    middleware::{auth::RequestOwner, i18n::Locale, json_body::JsonBody},
    models::client::{Client, ClientChanges, ClientData},
};

fn checked_email(email: Option<String>) -> Result<Option<String>, AppError> {
    match clean(email) {
        Some(email) if !email.validate_email() => Err(AppError::InvalidField {
            field: "email",
            reason: "invalid_email",
        }),
        other => Ok(other),
    }
}

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientListQuery {
    /// Busca em nome, e-mail e empresa
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientIdQuery {
    pub id: Option<String>,
}

/// POST e PUT. No PUT o `id` é obrigatório e campos ausentes viram null.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ClientPayload {
    pub id: Option<String>,

    #[validate(length(max = 255, message = "length_1_255"))]
    #[schema(example = "Acme")]
    pub name: Option<String>,

    #[schema(example = "contact@acme.fr")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

impl ClientPayload {
    fn into_data(self) -> Result<ClientData, AppError> {
        Ok(ClientData {
            name: required_text(self.name, "name")?,
            email: checked_email(self.email)?,
            phone: clean(self.phone),
            company: clean(self.company),
            notes: clean(self.notes),
        })
    }
}

/// PATCH: só o que vier no corpo é alterado; `null` limpa o campo.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchClientPayload {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub company: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    pub archived: Option<bool>,
}

impl PatchClientPayload {
    fn into_changes(self) -> Result<ClientChanges, AppError> {
        let name = match self.name {
            None => None,
            Some(name) => Some(required_text(name, "name")?),
        };
        if name.as_ref().is_some_and(|n| n.chars().count() > 255) {
            return Err(AppError::InvalidField { field: "name", reason: "length_1_255" });
        }
        let email = match self.email {
            None => None,
            Some(email) => Some(checked_email(email)?),
        };

        Ok(ClientChanges {
            name,
            email,
            phone: self.phone.map(clean),
            company: self.company.map(clean),
            notes: self.notes.map(clean),
            archived: self.archived,
        })
    }
}

// =============================================================================
//  HANDLERS
// =============================================================================

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    params(ClientListQuery),
    responses(
        (status = 200, description = "Clientes não arquivados, mais novos primeiro", body = Vec<Client>)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ClientListQuery>,
) -> Result<ApiResponse<Vec<Client>>, ApiError> {
    let search = clean(query.search);

    let clients = app_state
        .client_service
        .list(&app_state.db_pool, search.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(ApiResponse::ok(clients))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Nome ausente ou dados inválidos")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    locale: Locale,
    RequestOwner(owner): RequestOwner,
    JsonBody(payload): JsonBody<ClientPayload>,
) -> Result<ApiResponse<Client>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    payload.validate().map_err(|e| to_api(e.into()))?;
    let data = payload.into_data().map_err(to_api)?;

    let client = app_state
        .client_service
        .create(&app_state.db_pool, &data, owner)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::created(client))
}

// PUT /api/clients
#[utoipa::path(
    put,
    path = "/api/clients",
    tag = "Clients",
    request_body = ClientPayload,
    responses(
        (status = 200, description = "Cliente substituído", body = Client),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado ou de outro dono")
    ),
    security(("session_cookie" = []))
)]
pub async fn replace_client(
    State(app_state): State<AppState>,
    locale: Locale,
    RequestOwner(owner): RequestOwner,
    JsonBody(payload): JsonBody<ClientPayload>,
) -> Result<ApiResponse<Client>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    payload.validate().map_err(|e| to_api(e.into()))?;
    let id = required_uuid(payload.id.as_deref(), "id").map_err(to_api)?;
    let data = payload.into_data().map_err(to_api)?;

    let client = app_state
        .client_service
        .replace(&app_state.db_pool, id, &data, owner)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(client))
}

// PATCH /api/clients
#[utoipa::path(
    patch,
    path = "/api/clients",
    tag = "Clients",
    request_body = PatchClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado (pode arquivar)", body = Client),
        (status = 404, description = "Cliente não encontrado ou de outro dono")
    ),
    security(("session_cookie" = []))
)]
pub async fn patch_client(
    State(app_state): State<AppState>,
    locale: Locale,
    RequestOwner(owner): RequestOwner,
    JsonBody(payload): JsonBody<PatchClientPayload>,
) -> Result<ApiResponse<Client>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = required_uuid(payload.id.as_deref(), "id").map_err(to_api)?;
    let changes = payload.into_changes().map_err(to_api)?;

    let client = app_state
        .client_service
        .update_partial(&app_state.db_pool, id, &changes, owner)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(client))
}

// DELETE /api/clients?id= (arquiva, nunca apaga)
#[utoipa::path(
    delete,
    path = "/api/clients",
    tag = "Clients",
    params(ClientIdQuery),
    responses(
        (status = 200, description = "Cliente arquivado", body = Client),
        (status = 404, description = "Cliente não encontrado ou de outro dono")
    ),
    security(("session_cookie" = []))
)]
pub async fn archive_client(
    State(app_state): State<AppState>,
    locale: Locale,
    RequestOwner(owner): RequestOwner,
    Query(query): Query<ClientIdQuery>,
) -> Result<ApiResponse<Client>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = required_uuid(query.id.as_deref(), "id").map_err(to_api)?;
    let client = app_state
        .client_service
        .archive(&app_state.db_pool, id, owner)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_name_is_rejected() {
        let payload: ClientPayload = serde_json::from_value(json!({ "name": "   " })).unwrap();
        assert!(matches!(payload.into_data(), Err(AppError::MissingField("name"))));
    }

    #[test]
    fn blank_optional_fields_become_null() {
        let payload: ClientPayload =
            serde_json::from_value(json!({ "name": " Acme ", "email": "", "phone": " " })).unwrap();
        let data = payload.into_data().unwrap();
        assert_eq!(data.name, "Acme");
        assert_eq!(data.email, None);
        assert_eq!(data.phone, None);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let payload: ClientPayload =
            serde_json::from_value(json!({ "name": "Acme", "email": "not-an-email" })).unwrap();
        assert!(matches!(
            payload.into_data(),
            Err(AppError::InvalidField { field: "email", .. })
        ));
    }

    #[test]
    fn empty_patch_changes_nothing_but_the_timestamp() {
        let payload: PatchClientPayload = serde_json::from_value(json!({ "id": "x" })).unwrap();
        assert_eq!(payload.into_changes().unwrap(), ClientChanges::default());
    }

    #[test]
    fn patch_can_archive_and_clear_fields() {
        let payload: PatchClientPayload =
            serde_json::from_value(json!({ "archived": true, "notes": null, "company": "ACME SA" })).unwrap();
        let changes = payload.into_changes().unwrap();
        assert_eq!(changes.archived, Some(true));
        assert_eq!(changes.notes, Some(None));
        assert_eq!(changes.company, Some(Some("ACME SA".to_string())));
        assert_eq!(changes.name, None);
    }

    #[test]
    fn patch_cannot_blank_the_name() {
        let payload: PatchClientPayload = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(payload.into_changes().is_err());
    }
}
