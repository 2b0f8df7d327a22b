// src/handlers/profiles.rs

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        input::{clean, deserialize_some, parse_uuid, required_uuid},
        response::{ApiResponse, Deleted},
    },
    config::AppState,
    middleware::{i18n::Locale, json_body::JsonBody},
    models::{
        auth::Role,
        profile::{Profile, ProfileChanges, ProfileFilter},
    },
};

fn parse_role(raw: &str) -> Result<Role, AppError> {
    raw.parse().map_err(|_| AppError::InvalidField {
        field: "role",
        reason: "invalid_role",
    })
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileListQuery {
    /// admin | commercial | developer
    pub role: Option<String>,
    /// Quando presente, devolve um único perfil (404 se não existir)
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileIdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfilePayload {
    pub id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 255, message = "length_1_255"))]
    #[schema(value_type = Option<String>, example = "Marie Dupont")]
    pub full_name: Option<Option<String>>,

    #[schema(example = "commercial")]
    pub role: Option<String>,
}

impl UpdateProfilePayload {
    fn into_changes(self) -> Result<ProfileChanges, AppError> {
        Ok(ProfileChanges {
            full_name: self.full_name.map(clean),
            role: self.role.map(|r| parse_role(&r)).transpose()?,
        })
    }
}

// GET /api/profiles
#[utoipa::path(
    get,
    path = "/api/profiles",
    tag = "Profiles",
    params(ProfileListQuery),
    responses(
        (status = 200, description = "Lista de perfis, ou um perfil quando user_id é informado", body = Vec<Profile>),
        (status = 404, description = "Perfil não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_profiles(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ProfileListQuery>,
) -> Result<Response, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    if let Some(user_id) = clean(query.user_id) {
        let id = parse_uuid(&user_id, "user_id").map_err(to_api)?;
        let profile = app_state
            .profile_service
            .get(&app_state.db_pool, id)
            .await
            .map_err(to_api)?;
        return Ok(ApiResponse::ok(profile).into_response());
    }

    let filter = ProfileFilter {
        role: clean(query.role).map(|r| parse_role(&r)).transpose().map_err(to_api)?,
        user_id: None,
    };
    let profiles = app_state
        .profile_service
        .list(&app_state.db_pool, &filter)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(profiles).into_response())
}

// PUT /api/profiles
#[utoipa::path(
    put,
    path = "/api/profiles",
    tag = "Profiles",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = Profile),
        (status = 400, description = "Papel inválido"),
        (status = 404, description = "Perfil não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<UpdateProfilePayload>,
) -> Result<ApiResponse<Profile>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    payload.validate().map_err(|e| to_api(e.into()))?;
    let id = required_uuid(payload.id.as_deref(), "id").map_err(to_api)?;
    let changes = payload.into_changes().map_err(to_api)?;

    let profile = app_state
        .profile_service
        .update(&app_state.db_pool, id, &changes)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(profile))
}

// DELETE /api/profiles?id=
#[utoipa::path(
    delete,
    path = "/api/profiles",
    tag = "Profiles",
    params(ProfileIdQuery),
    responses(
        (status = 200, description = "Perfil removido", body = Deleted),
        (status = 404, description = "Perfil não encontrado"),
        (status = 409, description = "Perfil ainda é dono de registros")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ProfileIdQuery>,
) -> Result<ApiResponse<Deleted>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = required_uuid(query.id.as_deref(), "id").map_err(to_api)?;
    app_state
        .profile_service
        .delete(&app_state.db_pool, id)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(Deleted::new(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_roles_are_rejected() {
        let payload: UpdateProfilePayload =
            serde_json::from_value(json!({ "id": "x", "role": "manager" })).unwrap();
        assert!(matches!(
            payload.into_changes(),
            Err(AppError::InvalidField { field: "role", .. })
        ));
    }

    #[test]
    fn full_name_can_be_cleared() {
        let payload: UpdateProfilePayload =
            serde_json::from_value(json!({ "full_name": null, "role": "developer" })).unwrap();
        let changes = payload.into_changes().unwrap();
        assert_eq!(changes.full_name, Some(None));
        assert_eq!(changes.role, Some(Role::Developer));
    }
}
