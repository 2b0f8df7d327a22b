// src/handlers/auth.rs

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        response::ApiResponse,
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        json_body::JsonBody,
        rate_limit::{retry_after_secs, ClientIp, RateDecision},
    },
    models::auth::{Identity, LoginPayload, LoginResponse},
    services::auth::{clear_session_cookie, session_cookie},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão aberta; cookie session-token definido", body = LoginResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Credenciais inválidas"),
        (status = 429, description = "Muitas tentativas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    ClientIp(ip): ClientIp,
    body: Result<JsonBody<LoginPayload>, ApiError>,
) -> Result<Response, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    // Conta a tentativa antes de olhar o corpo: JSON quebrado também gasta.
    if let RateDecision::Limited { retry_after } = app_state.login_rate_limiter.hit(&ip).await {
        tracing::warn!("🚫 Muitas tentativas de login a partir de {}", ip);
        return Err(to_api(AppError::RateLimited {
            key: "too_many_login_attempts",
            retry_after_secs: retry_after_secs(retry_after),
        }));
    }
    let JsonBody(payload) = body?;

    payload.validate().map_err(|e| to_api(AppError::ValidationError(e)))?;
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let Some(identity) = app_state.session_service.authenticate(&username, &password).await else {
        tracing::warn!("Login recusado para '{}' a partir de {}", username, ip);
        return Err(to_api(AppError::InvalidCredentials));
    };

    let token = app_state.session_service.issue_token(&identity).map_err(to_api)?;
    tracing::info!("🔑 Login do administrador '{}' a partir de {}", identity.username, ip);

    let jar = CookieJar::new().add(session_cookie(&token, app_state.settings.is_production()));
    Ok((jar, ApiResponse::ok(LoginResponse { user: identity })).into_response())
}

// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Cookie de sessão removido"))
)]
pub async fn logout(State(app_state): State<AppState>) -> Response {
    let jar = CookieJar::new().add(clear_session_cookie(app_state.settings.is_production()));
    (jar, ApiResponse::ok(serde_json::json!({ "logged_out": true }))).into_response()
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Identidade da sessão", body = Identity),
        (status = 401, description = "Não autenticado")
    ),
    security(("session_cookie" = []))
)]
pub async fn me(AuthenticatedUser(identity): AuthenticatedUser) -> ApiResponse<Identity> {
    ApiResponse::ok(identity)
}
