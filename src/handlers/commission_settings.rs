// src/handlers/commission_settings.rs

use axum::extract::{Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::{
        error::{ApiError, AppError},
        input::{clean, parse_uuid, percentage, require, required_uuid, NumericInput},
        response::{ApiResponse, Deleted},
    },
    config::AppState,
    middleware::{i18n::Locale, json_body::JsonBody},
    models::commission::CommissionWithProfile,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommissionQuery {
    pub user_id: Option<String>,
}

/// POST e PUT: a chave é o `user_id`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommissionPayload {
    pub user_id: Option<String>,
    #[schema(value_type = Option<f64>, example = 8.5)]
    pub commission_percentage: Option<NumericInput>,
}

impl CommissionPayload {
    fn into_parts(self) -> Result<(Uuid, Decimal), AppError> {
        let user_id = required_uuid(self.user_id.as_deref(), "user_id")?;
        let value = require(self.commission_percentage, "commission_percentage")?;
        Ok((user_id, percentage(&value, "commission_percentage")?))
    }
}

// GET /api/commission-settings
#[utoipa::path(
    get,
    path = "/api/commission-settings",
    tag = "Commission Settings",
    params(CommissionQuery),
    responses(
        (status = 200, description = "Comissões com o resumo do perfil", body = Vec<CommissionWithProfile>)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_commission_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<CommissionQuery>,
) -> Result<ApiResponse<Vec<CommissionWithProfile>>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let user_id = clean(query.user_id)
        .map(|id| parse_uuid(&id, "user_id"))
        .transpose()
        .map_err(to_api)?;
    let settings = app_state
        .commission_service
        .list(&app_state.db_pool, user_id)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(settings))
}

// POST /api/commission-settings
#[utoipa::path(
    post,
    path = "/api/commission-settings",
    tag = "Commission Settings",
    request_body = CommissionPayload,
    responses(
        (status = 201, description = "Comissão criada", body = CommissionWithProfile),
        (status = 400, description = "Percentual fora de 0..100 ou usuário inválido"),
        (status = 409, description = "O usuário já tem uma comissão")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_commission_setting(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CommissionPayload>,
) -> Result<ApiResponse<CommissionWithProfile>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let (user_id, percentage) = payload.into_parts().map_err(to_api)?;
    let setting = app_state
        .commission_service
        .create(&app_state.db_pool, user_id, percentage)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::created(setting))
}

// PUT /api/commission-settings
#[utoipa::path(
    put,
    path = "/api/commission-settings",
    tag = "Commission Settings",
    request_body = CommissionPayload,
    responses(
        (status = 200, description = "Comissão atualizada", body = CommissionWithProfile),
        (status = 404, description = "Usuário sem comissão")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_commission_setting(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CommissionPayload>,
) -> Result<ApiResponse<CommissionWithProfile>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let (user_id, percentage) = payload.into_parts().map_err(to_api)?;
    let setting = app_state
        .commission_service
        .update(&app_state.db_pool, user_id, percentage)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(setting))
}

// DELETE /api/commission-settings?user_id=
#[utoipa::path(
    delete,
    path = "/api/commission-settings",
    tag = "Commission Settings",
    params(CommissionQuery),
    responses(
        (status = 200, description = "Comissão removida (id = user_id)", body = Deleted),
        (status = 404, description = "Usuário sem comissão")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_commission_setting(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<CommissionQuery>,
) -> Result<ApiResponse<Deleted>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let user_id = required_uuid(query.user_id.as_deref(), "user_id").map_err(to_api)?;
    app_state
        .commission_service
        .delete(&app_state.db_pool, user_id)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(Deleted::new(user_id)))
}
