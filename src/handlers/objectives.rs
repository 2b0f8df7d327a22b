// src/handlers/objectives.rs

use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::{
        error::{ApiError, AppError},
        input::{clean, non_negative_decimal, non_negative_i32, parse_uuid, require, required_uuid, NumericInput},
        response::{ApiResponse, Deleted},
    },
    config::AppState,
    middleware::{auth::RequestOwner, i18n::Locale, json_body::JsonBody},
    models::objective::{Objective, ObjectiveData, ObjectiveFilter},
};

/// 3, "3" e "03" viram "03".
fn normalize_month(input: &NumericInput) -> Result<String, AppError> {
    let invalid = AppError::InvalidField {
        field: "month",
        reason: "invalid_month",
    };
    match input.to_i32("month") {
        Ok(month @ 1..=12) => Ok(format!("{month:02}")),
        _ => Err(invalid),
    }
}

fn parse_year(input: &NumericInput) -> Result<i32, AppError> {
    match input.to_i32("year") {
        Ok(year @ 1900..=9999) => Ok(year),
        _ => Err(AppError::InvalidField {
            field: "year",
            reason: "invalid_year",
        }),
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ObjectiveListQuery {
    pub year: Option<String>,
    pub month: Option<String>,
    /// Dono (created_by)
    pub user_id: Option<String>,
}

impl ObjectiveListQuery {
    fn into_filter(self) -> Result<ObjectiveFilter, AppError> {
        Ok(ObjectiveFilter {
            year: clean(self.year)
                .map(|y| parse_year(&NumericInput::Text(y)))
                .transpose()?,
            month: clean(self.month)
                .map(|m| normalize_month(&NumericInput::Text(m)))
                .transpose()?,
            user_id: clean(self.user_id)
                .map(|id| parse_uuid(&id, "user_id"))
                .transpose()?,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ObjectiveIdQuery {
    pub id: Option<String>,
}

/// POST e PUT (no PUT o `id` é obrigatório).
#[derive(Debug, Deserialize, ToSchema)]
pub struct ObjectivePayload {
    pub id: Option<String>,
    #[schema(value_type = Option<String>, example = "03")]
    pub month: Option<NumericInput>,
    #[schema(value_type = Option<i32>, example = 2025)]
    pub year: Option<NumericInput>,
    #[schema(value_type = Option<i32>, example = 10)]
    pub target_missions: Option<NumericInput>,
    #[schema(value_type = Option<f64>, example = 180000)]
    pub target_revenue: Option<NumericInput>,
}

impl ObjectivePayload {
    fn into_data(self) -> Result<ObjectiveData, AppError> {
        let month = require(self.month, "month")?;
        let year = require(self.year, "year")?;
        let target_missions = require(self.target_missions, "target_missions")?;
        let target_revenue = require(self.target_revenue, "target_revenue")?;

        Ok(ObjectiveData {
            month: normalize_month(&month)?,
            year: parse_year(&year)?,
            target_missions: non_negative_i32(&target_missions, "target_missions")?,
            target_revenue: non_negative_decimal(&target_revenue, "target_revenue")?,
        })
    }
}

// GET /api/objectives
#[utoipa::path(
    get,
    path = "/api/objectives",
    tag = "Objectives",
    params(ObjectiveListQuery),
    responses(
        (status = 200, description = "Objetivos, ano e mês decrescentes", body = Vec<Objective>)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_objectives(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ObjectiveListQuery>,
) -> Result<ApiResponse<Vec<Objective>>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let filter = query.into_filter().map_err(to_api)?;
    let objectives = app_state
        .objective_service
        .list(&app_state.db_pool, &filter)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(objectives))
}

// POST /api/objectives
#[utoipa::path(
    post,
    path = "/api/objectives",
    tag = "Objectives",
    request_body = ObjectivePayload,
    responses(
        (status = 201, description = "Objetivo criado", body = Objective),
        (status = 400, description = "Campos ausentes ou inválidos"),
        (status = 409, description = "Já existe objetivo para este mês/ano")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_objective(
    State(app_state): State<AppState>,
    locale: Locale,
    RequestOwner(owner): RequestOwner,
    JsonBody(payload): JsonBody<ObjectivePayload>,
) -> Result<ApiResponse<Objective>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let data = payload.into_data().map_err(to_api)?;
    let objective = app_state
        .objective_service
        .create(&app_state.db_pool, &data, owner)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::created(objective))
}

// PUT /api/objectives
#[utoipa::path(
    put,
    path = "/api/objectives",
    tag = "Objectives",
    request_body = ObjectivePayload,
    responses(
        (status = 200, description = "Objetivo substituído", body = Objective),
        (status = 404, description = "Objetivo não encontrado"),
        (status = 409, description = "Colide com outro objetivo do mesmo dono")
    ),
    security(("session_cookie" = []))
)]
pub async fn replace_objective(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<ObjectivePayload>,
) -> Result<ApiResponse<Objective>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = required_uuid(payload.id.as_deref(), "id").map_err(to_api)?;
    let data = payload.into_data().map_err(to_api)?;
    let objective = app_state
        .objective_service
        .replace(&app_state.db_pool, id, &data)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(objective))
}

// DELETE /api/objectives?id=
#[utoipa::path(
    delete,
    path = "/api/objectives",
    tag = "Objectives",
    params(ObjectiveIdQuery),
    responses(
        (status = 200, description = "Objetivo removido", body = Deleted),
        (status = 404, description = "Objetivo não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_objective(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ObjectiveIdQuery>,
) -> Result<ApiResponse<Deleted>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = required_uuid(query.id.as_deref(), "id").map_err(to_api)?;
    app_state
        .objective_service
        .delete(&app_state.db_pool, id)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(Deleted::new(id)))
}
