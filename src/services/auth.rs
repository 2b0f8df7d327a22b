// src/services/auth.rs

use axum_extra::extract::cookie::{Cookie, SameSite};
use bcrypt::verify;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::Settings,
    models::auth::{Claims, Identity, Role},
};

pub const SESSION_COOKIE: &str = "session-token";
pub const SESSION_TTL_HOURS: i64 = 24;

/// Valida o administrador único e assina/verifica o token de sessão.
#[derive(Clone)]
pub struct SessionService {
    admin_username: String,
    admin_password_hash: String,
    admin_profile_id: Option<Uuid>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            admin_username: settings.admin_username.clone(),
            admin_password_hash: settings.admin_password_hash.clone(),
            admin_profile_id: settings.admin_profile_id,
            encoding_key: EncodingKey::from_secret(settings.session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.session_secret.as_bytes()),
        }
    }

    /// `None` para qualquer falha, inclusive hash não configurado.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<Identity> {
        if self.admin_password_hash.is_empty() {
            tracing::warn!("Tentativa de login sem ADMIN_PASSWORD_HASH configurado");
            return None;
        }
        // O bcrypt roda mesmo quando o usuário não bate.
        let username_matches = username == self.admin_username;

        let password_clone = password.to_owned();
        let password_hash_clone = self.admin_password_hash.clone();

        // Executa a verificação em um thread separado
        let result = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone)).await;

        let is_password_valid = match result {
            Ok(Ok(valid)) => valid,
            Ok(Err(e)) => {
                tracing::error!("Hash de senha do administrador inválido: {}", e);
                false
            }
            Err(e) => {
                tracing::error!("Falha na task de verificação de senha: {}", e);
                false
            }
        };

        if !(username_matches && is_password_valid) {
            return None;
        }

        Some(Identity {
            id: self.admin_username.clone(),
            username: self.admin_username.clone(),
            role: Role::Admin,
            login_time: Utc::now().timestamp_millis(),
            profile_id: self.admin_profile_id,
        })
    }

    pub fn issue_token(&self, identity: &Identity) -> Result<String, AppError> {
        self.issue_token_at(identity, Utc::now())
    }

    pub fn issue_token_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, AppError> {
        let expires_at = now + Duration::hours(SESSION_TTL_HOURS);

        let claims = Claims {
            sub: identity.id.clone(),
            username: identity.username.clone(),
            role: identity.role,
            login_time: identity.login_time,
            profile_id: identity.profile_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn verify_token(&self, token: &str) -> Option<Identity> {
        self.verify_token_at(token, Utc::now())
    }

    /// Assinatura e expiração; qualquer falha vira `None`.
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Option<Identity> {
        // A expiração é checada aqui embaixo contra `now`, sem leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!("Token de sessão rejeitado: {}", e);
                return None;
            }
        };

        if now.timestamp() >= claims.exp {
            return None;
        }

        Some(claims.into_identity())
    }
}

fn base_cookie(value: String, max_age: time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(max_age)
        .secure(secure)
        .build()
}

/// Cookie da sessão: HttpOnly, SameSite=Strict, 24h; Secure em produção.
pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    base_cookie(token.to_string(), time::Duration::hours(SESSION_TTL_HOURS), secure)
}

pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    base_cookie(String::new(), time::Duration::ZERO, secure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with(password: Option<&str>) -> SessionService {
        let mut settings = Settings::new("postgres://localhost/kelio", "test-secret");
        if let Some(password) = password {
            settings.admin_password_hash = bcrypt::hash(password, 4).unwrap();
        }
        SessionService::new(&settings)
    }

    fn identity() -> Identity {
        Identity {
            id: "admin".into(),
            username: "admin".into(),
            role: Role::Admin,
            login_time: 1_700_000_000_000,
            profile_id: Uuid::parse_str("6b656c69-6f00-4d00-8000-0000000000aa").ok(),
        }
    }

    #[test]
    fn token_round_trips_until_expiry() {
        let service = service_with(None);
        let issued_at = Utc::now();
        let token = service.issue_token_at(&identity(), issued_at).unwrap();

        let just_before = issued_at + Duration::hours(24) - Duration::seconds(1);
        assert_eq!(service.verify_token_at(&token, issued_at), Some(identity()));
        assert_eq!(service.verify_token_at(&token, just_before), Some(identity()));

        assert_eq!(service.verify_token_at(&token, issued_at + Duration::hours(24)), None);
        assert_eq!(service.verify_token_at(&token, issued_at + Duration::days(2)), None);
    }

    #[test]
    fn tampered_or_foreign_tokens_are_rejected() {
        let service = service_with(None);
        let token = service.issue_token(&identity()).unwrap();

        // Payload de outro token com a assinatura deste
        let forged_identity = Identity { username: "mallory".into(), ..identity() };
        let forged = service.issue_token(&forged_identity).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);
        assert_eq!(service.verify_token(&tampered), None);

        let other = SessionService::new(&Settings::new("postgres://localhost/kelio", "other-secret"));
        assert_eq!(other.verify_token(&token), None);

        assert_eq!(service.verify_token("not-a-jwt"), None);
        assert_eq!(service.verify_token(""), None);
    }

    #[tokio::test]
    async fn authenticate_checks_username_and_password() {
        let service = service_with(Some("correct horse"));

        let identity = service.authenticate("admin", "correct horse").await.unwrap();
        assert_eq!(identity.username, "admin");
        assert_eq!(identity.role, Role::Admin);

        assert!(service.authenticate("admin", "wrong").await.is_none());
        assert!(service.authenticate("root", "correct horse").await.is_none());
    }

    #[tokio::test]
    async fn authenticate_fails_closed_without_hash() {
        let service = service_with(None);
        assert!(service.authenticate("admin", "").await.is_none());
        assert!(service.authenticate("admin", "anything").await.is_none());
    }

    #[test]
    fn cookies_carry_the_session_attributes() {
        let cookie = session_cookie("abc", false);
        assert_eq!(cookie.name(), "session-token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86_400)));
        assert!(!cookie.to_string().contains("Secure"));

        assert!(session_cookie("abc", true).to_string().contains("Secure"));
        assert!(clear_session_cookie(false).to_string().contains("Max-Age=0"));
    }
}
