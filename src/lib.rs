// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::{config::AppState, docs::ApiDoc, middleware::auth::session_gate};

/// Monta o router completo. O `session_gate` envolve tudo, fallback incluso.
pub fn build_router(app_state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me));

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/auth", auth_routes)
        .route(
            "/clients",
            get(handlers::clients::list_clients)
                .post(handlers::clients::create_client)
                .put(handlers::clients::replace_client)
                .patch(handlers::clients::patch_client)
                .delete(handlers::clients::archive_client),
        )
        .route(
            "/missions",
            get(handlers::missions::list_missions)
                .post(handlers::missions::create_mission)
                .put(handlers::missions::replace_mission)
                .patch(handlers::missions::patch_mission)
                .delete(handlers::missions::delete_mission),
        )
        .route(
            "/objectives",
            get(handlers::objectives::list_objectives)
                .post(handlers::objectives::create_objective)
                .put(handlers::objectives::replace_objective)
                .delete(handlers::objectives::delete_objective),
        )
        .route(
            "/profiles",
            get(handlers::profiles::list_profiles)
                .put(handlers::profiles::update_profile)
                .delete(handlers::profiles::delete_profile),
        )
        .route(
            "/commission-settings",
            get(handlers::commission_settings::list_commission_settings)
                .post(handlers::commission_settings::create_commission_setting)
                .put(handlers::commission_settings::update_commission_setting)
                .delete(handlers::commission_settings::delete_commission_setting),
        )
        .route("/dashboard/stats", get(handlers::dashboard::get_stats))
        .route("/demo/load", post(handlers::demo::load_demo))
        .route("/demo/clear", delete(handlers::demo::clear_demo));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), session_gate))
        .with_state(app_state)
}
