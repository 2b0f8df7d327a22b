// src/handlers/dashboard.rs

use axum::extract::State;

use crate::{
    common::{error::ApiError, response::ApiResponse},
    config::AppState,
    middleware::i18n::Locale,
    models::dashboard::DashboardStats,
};

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Números do painel", body = DashboardStats)
    ),
    security(("session_cookie" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<ApiResponse<DashboardStats>, ApiError> {
    let stats = app_state
        .dashboard_service
        .get_stats(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(ApiResponse::ok(stats))
}
