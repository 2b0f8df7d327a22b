// src/handlers/missions.rs

use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        input::{
            clean, deserialize_some, non_negative_decimal, parse_date, parse_uuid, require,
            required_text, required_uuid, NumericInput,
        },
        response::{ApiResponse, Deleted},
    },
    config::AppState,
    middleware::{auth::RequestOwner, i18n::Locale, json_body::JsonBody},
    models::mission::{MissionChanges, MissionData, MissionFilter, MissionStatus, MissionWithClient},
};

fn parse_status(raw: &str) -> Result<MissionStatus, AppError> {
    raw.parse().map_err(|_| AppError::InvalidField {
        field: "status",
        reason: "invalid_status",
    })
}

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MissionListQuery {
    /// pending | in_progress | completed | paid
    pub status: Option<String>,
    pub client_id: Option<String>,
    /// Busca em título e descrição
    pub search: Option<String>,
}

impl MissionListQuery {
    fn into_filter(self) -> Result<MissionFilter, AppError> {
        Ok(MissionFilter {
            status: clean(self.status).map(|s| parse_status(&s)).transpose()?,
            client_id: clean(self.client_id)
                .map(|id| parse_uuid(&id, "client_id"))
                .transpose()?,
            search: clean(self.search),
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MissionIdQuery {
    pub id: Option<String>,
}

/// POST e PUT. `amount` é aceito como sinônimo de `total_amount`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MissionPayload {
    pub id: Option<String>,

    #[validate(length(max = 255, message = "length_1_255"))]
    #[schema(example = "Refonte Site Web")]
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<String>,

    /// YYYY-MM-DD
    #[schema(example = "2025-09-15")]
    pub deadline: Option<String>,

    #[serde(alias = "amount")]
    #[schema(value_type = Option<f64>, example = 28000)]
    pub total_amount: Option<NumericInput>,

    #[schema(value_type = Option<f64>)]
    pub advance_amount: Option<NumericInput>,

    #[schema(example = "pending")]
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl MissionPayload {
    fn into_data(self) -> Result<MissionData, AppError> {
        let total_amount = require(self.total_amount, "total_amount")?;
        let advance_amount = match self.advance_amount {
            Some(value) => non_negative_decimal(&value, "advance_amount")?,
            None => Default::default(),
        };

        Ok(MissionData {
            title: required_text(self.title, "title")?,
            description: clean(self.description),
            client_id: required_uuid(self.client_id.as_deref(), "client_id")?,
            deadline: parse_date(self.deadline, "deadline")?,
            total_amount: non_negative_decimal(&total_amount, "total_amount")?,
            advance_amount,
            status: clean(self.status)
                .map(|s| parse_status(&s))
                .transpose()?
                .unwrap_or_default(),
            notes: clean(self.notes),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchMissionPayload {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub client_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub deadline: Option<Option<String>>,
    #[serde(alias = "amount")]
    #[schema(value_type = Option<f64>)]
    pub total_amount: Option<NumericInput>,
    #[schema(value_type = Option<f64>)]
    pub advance_amount: Option<NumericInput>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl PatchMissionPayload {
    fn into_changes(self) -> Result<MissionChanges, AppError> {
        let title = match self.title {
            Some(title) => Some(required_text(Some(title), "title")?),
            None => None,
        };

        Ok(MissionChanges {
            title,
            description: self.description.map(clean),
            client_id: self
                .client_id
                .map(|id| parse_uuid(&id, "client_id"))
                .transpose()?,
            deadline: self
                .deadline
                .map(|d| parse_date(d, "deadline"))
                .transpose()?,
            total_amount: self
                .total_amount
                .map(|v| non_negative_decimal(&v, "total_amount"))
                .transpose()?,
            advance_amount: self
                .advance_amount
                .map(|v| non_negative_decimal(&v, "advance_amount"))
                .transpose()?,
            status: self.status.map(|s| parse_status(&s)).transpose()?,
            notes: self.notes.map(clean),
        })
    }
}

// =============================================================================
//  HANDLERS
// =============================================================================

// GET /api/missions
#[utoipa::path(
    get,
    path = "/api/missions",
    tag = "Missions",
    params(MissionListQuery),
    responses(
        (status = 200, description = "Missões com o resumo do cliente", body = Vec<MissionWithClient>),
        (status = 400, description = "Filtro inválido")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_missions(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<MissionListQuery>,
) -> Result<ApiResponse<Vec<MissionWithClient>>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let filter = query.into_filter().map_err(to_api)?;
    let missions = app_state
        .mission_service
        .list(&app_state.db_pool, &filter)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(missions))
}

// POST /api/missions
#[utoipa::path(
    post,
    path = "/api/missions",
    tag = "Missions",
    request_body = MissionPayload,
    responses(
        (status = 201, description = "Missão criada", body = MissionWithClient),
        (status = 400, description = "Título, cliente ou valor ausente/inválido")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_mission(
    State(app_state): State<AppState>,
    locale: Locale,
    RequestOwner(owner): RequestOwner,
    JsonBody(payload): JsonBody<MissionPayload>,
) -> Result<ApiResponse<MissionWithClient>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    payload.validate().map_err(|e| to_api(e.into()))?;
    let data = payload.into_data().map_err(to_api)?;

    let mission = app_state
        .mission_service
        .create(&app_state.db_pool, &data, owner)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::created(mission))
}

// PUT /api/missions
#[utoipa::path(
    put,
    path = "/api/missions",
    tag = "Missions",
    request_body = MissionPayload,
    responses(
        (status = 200, description = "Missão substituída", body = MissionWithClient),
        (status = 404, description = "Missão não encontrada")
    ),
    security(("session_cookie" = []))
)]
pub async fn replace_mission(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<MissionPayload>,
) -> Result<ApiResponse<MissionWithClient>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    payload.validate().map_err(|e| to_api(e.into()))?;
    let id = required_uuid(payload.id.as_deref(), "id").map_err(to_api)?;
    let data = payload.into_data().map_err(to_api)?;

    let mission = app_state
        .mission_service
        .replace(&app_state.db_pool, id, &data)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(mission))
}

// PATCH /api/missions
#[utoipa::path(
    patch,
    path = "/api/missions",
    tag = "Missions",
    request_body = PatchMissionPayload,
    responses(
        (status = 200, description = "Missão atualizada", body = MissionWithClient),
        (status = 404, description = "Missão não encontrada")
    ),
    security(("session_cookie" = []))
)]
pub async fn patch_mission(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<PatchMissionPayload>,
) -> Result<ApiResponse<MissionWithClient>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = required_uuid(payload.id.as_deref(), "id").map_err(to_api)?;
    let changes = payload.into_changes().map_err(to_api)?;

    let mission = app_state
        .mission_service
        .update_partial(&app_state.db_pool, id, &changes)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(mission))
}

// DELETE /api/missions?id=
#[utoipa::path(
    delete,
    path = "/api/missions",
    tag = "Missions",
    params(MissionIdQuery),
    responses(
        (status = 200, description = "Missão removida", body = Deleted),
        (status = 404, description = "Missão não encontrada")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_mission(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<MissionIdQuery>,
) -> Result<ApiResponse<Deleted>, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = required_uuid(query.id.as_deref(), "id").map_err(to_api)?;
    app_state
        .mission_service
        .delete(&app_state.db_pool, id)
        .await
        .map_err(to_api)?;

    Ok(ApiResponse::ok(Deleted::new(id)))
}
