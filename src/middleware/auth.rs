// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rate_limit::{client_ip, retry_after_secs, RateDecision},
    },
    models::auth::{Identity, OwnerScope},
    services::auth::SESSION_COOKIE,
};

// Páginas públicas (prefixo) e rotas de API públicas (exatas)
const PUBLIC_PAGE_PREFIXES: &[&str] = &[
    "/login",
    "/api/auth/login",
    "/api/auth/logout",
    "/favicon.ico",
    "/public",
    "/swagger-ui",
    "/api-docs",
];
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/auth/logout", "/api/health"];

pub fn is_public_route(path: &str) -> bool {
    PUBLIC_API_ROUTES.contains(&path)
        || PUBLIC_PAGE_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn is_api_route(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self' 'unsafe-eval' 'unsafe-inline'; \
     style-src 'self' 'unsafe-inline'; img-src 'self' data: https:; font-src 'self' data:;";

pub fn apply_security_headers(headers: &mut HeaderMap, production: bool) {
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("strict-origin-when-cross-origin"));
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
    );
    headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));
    headers.insert(header::CONTENT_SECURITY_POLICY, HeaderValue::from_static(CONTENT_SECURITY_POLICY));
    if production {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }
}

fn login_redirect(path: &str) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect", path)
        .finish();
    Redirect::temporary(&format!("/login?{query}"))
}

/// Gate de toda requisição: rate limit, headers de segurança, rotas
/// públicas, cookie de sessão. Em caso de sucesso a `Identity` vai para
/// os extensions.
pub async fn session_gate(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let locale = Locale::from_headers(request.headers());
    let production = app_state.settings.is_production();
    let ip = client_ip(&request);

    // 1. Rate limit
    if let RateDecision::Limited { retry_after } = app_state.rate_limiter.hit(&ip).await {
        tracing::warn!("🚫 Rate limit excedido para {}", ip);
        let mut response = AppError::RateLimited {
            key: "too_many_requests",
            retry_after_secs: retry_after_secs(retry_after),
        }
        .to_api_error(&locale, &app_state.i18n_store)
        .into_response();
        apply_security_headers(response.headers_mut(), production);
        return response;
    }

    let path = request.uri().path().to_string();

    // 2. Rotas públicas passam direto
    if is_public_route(&path) {
        let mut response = next.run(request).await;
        apply_security_headers(response.headers_mut(), production);
        return response;
    }

    // 3. Cookie de sessão
    let identity = CookieJar::from_headers(request.headers())
        .get(SESSION_COOKIE)
        .and_then(|cookie| app_state.session_service.verify_token(cookie.value()));

    let Some(identity) = identity else {
        let mut response = if is_api_route(&path) {
            AppError::Unauthenticated
                .to_api_error(&locale, &app_state.i18n_store)
                .into_response()
        } else {
            login_redirect(&path).into_response()
        };
        apply_security_headers(response.headers_mut(), production);
        return response;
    };

    let user_id = HeaderValue::from_str(&identity.id).ok();
    let user_role = HeaderValue::from_static(identity.role.as_str());
    request.extensions_mut().insert(identity);

    let mut response = next.run(request).await;
    if is_api_route(&path) {
        if let Some(user_id) = user_id {
            response.headers_mut().insert("x-user-id", user_id);
        }
        response.headers_mut().insert("x-user-role", user_role);
    }
    apply_security_headers(response.headers_mut(), production);
    response
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub Identity);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(identity) => Ok(AuthenticatedUser(identity.clone())),
            None => {
                let app_state = AppState::from_ref(state);
                Err(AppError::Unauthenticated
                    .to_api_error(&Locale::from_headers(&parts.headers), &app_state.i18n_store))
            }
        }
    }
}

/// Dono das escritas desta requisição: o perfil do admin, ou o dono
/// de demonstração quando DEMO_MODE está ligado.
pub struct RequestOwner(pub OwnerScope);

impl<S> FromRequestParts<S> for RequestOwner
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let identity = parts.extensions.get::<Identity>();

        OwnerScope::resolve(identity, app_state.settings.demo_mode)
            .map(RequestOwner)
            .ok_or_else(|| {
                AppError::Unauthenticated
                    .to_api_error(&Locale::from_headers(&parts.headers), &app_state.i18n_store)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        assert!(is_public_route("/login"));
        assert!(is_public_route("/login/reset"));
        assert!(is_public_route("/api/auth/login"));
        assert!(is_public_route("/api/health"));
        assert!(is_public_route("/swagger-ui/index.html"));

        assert!(!is_public_route("/api/health/db"));
        assert!(!is_public_route("/api/clients"));
        assert!(!is_public_route("/dashboard"));
        assert!(!is_public_route("/api/auth/me"));
    }

    #[test]
    fn redirect_preserves_the_requested_path() {
        let response = login_redirect("/dashboard/missions").into_response();
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login?redirect=%2Fdashboard%2Fmissions"
        );
    }

    #[test]
    fn hsts_only_in_production() {
        let mut headers = HeaderMap::new();
        apply_security_headers(&mut headers, false);
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
        assert!(headers
            .get(header::CONTENT_SECURITY_POLICY)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("default-src 'self';"));
        assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());

        apply_security_headers(&mut headers, true);
        assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_some());
    }
}
