// src/handlers/demo.rs

use axum::extract::State;

use crate::{
    common::{error::ApiError, response::ApiResponse},
    config::AppState,
    middleware::i18n::Locale,
    models::demo::{DemoClearSummary, DemoLoadSummary},
};

// POST /api/demo/load
#[utoipa::path(
    post,
    path = "/api/demo/load",
    tag = "Demo",
    responses(
        (status = 200, description = "Quantidade carregada por recurso", body = DemoLoadSummary),
        (status = 500, description = "Falha nos clientes ou nas missões")
    ),
    security(("session_cookie" = []))
)]
pub async fn load_demo(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<ApiResponse<DemoLoadSummary>, ApiError> {
    let summary = app_state
        .demo_service
        .load(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(ApiResponse::ok(summary))
}

// DELETE /api/demo/clear
#[utoipa::path(
    delete,
    path = "/api/demo/clear",
    tag = "Demo",
    responses(
        (status = 200, description = "Quantidade removida por recurso", body = DemoClearSummary),
        (status = 500, description = "Falha nas missões ou nos clientes")
    ),
    security(("session_cookie" = []))
)]
pub async fn clear_demo(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<ApiResponse<DemoClearSummary>, ApiError> {
    let summary = app_state
        .demo_service
        .clear(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(ApiResponse::ok(summary))
}
