// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    common::i18n::I18nStore,
    db::{
        ClientRepository, CommissionRepository, DashboardRepository, MissionRepository,
        NoteRepository, ObjectiveRepository, ProfileRepository,
    },
    middleware::rate_limit::{InMemoryRateLimiter, RateLimitStore},
    services::{
        auth::SessionService, ClientService, CommissionService, DashboardService, DemoService,
        MissionService, ObjectiveService, ProfileService,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub session_secret: String,
    pub admin_username: String,
    // Vazio = todo login falha
    pub admin_password_hash: String,
    pub admin_profile_id: Option<Uuid>,
    pub admin_email: String,
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
    pub login_rate_limit_max: u32,
    pub demo_mode: bool,
    pub environment: Environment,
    pub bind_addr: String,
}

impl Settings {
    /// Valores padrão para tudo que não é obrigatório.
    pub fn new(database_url: impl Into<String>, session_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_max_connections: 5,
            session_secret: session_secret.into(),
            admin_username: "admin".to_string(),
            admin_password_hash: String::new(),
            admin_profile_id: None,
            admin_email: "admin@localhost".to_string(),
            rate_limit_max: 100,
            rate_limit_window: Duration::from_millis(900_000),
            login_rate_limit_max: 5,
            demo_mode: false,
            environment: Environment::Development,
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let session_secret = env::var("SESSION_SECRET").context("SESSION_SECRET deve ser definido")?;
        if session_secret.trim().is_empty() {
            anyhow::bail!("SESSION_SECRET não pode ser vazio");
        }

        let mut settings = Self::new(database_url, session_secret);

        settings.database_max_connections =
            parse_var("DATABASE_MAX_CONNECTIONS", settings.database_max_connections)?;
        if let Some(username) = optional_var("ADMIN_USERNAME") {
            settings.admin_username = username;
        }
        settings.admin_password_hash = optional_var("ADMIN_PASSWORD_HASH").unwrap_or_default();
        settings.admin_profile_id = optional_var("ADMIN_PROFILE_ID")
            .map(|raw| Uuid::parse_str(&raw).context("ADMIN_PROFILE_ID deve ser um UUID"))
            .transpose()?;
        settings.admin_email = optional_var("ADMIN_EMAIL")
            .unwrap_or_else(|| format!("{}@localhost", settings.admin_username));
        settings.rate_limit_max = parse_var("RATE_LIMIT_MAX", settings.rate_limit_max)?;
        settings.rate_limit_window =
            Duration::from_millis(parse_var("RATE_LIMIT_WINDOW", 900_000u64)?);
        settings.login_rate_limit_max =
            parse_var("LOGIN_RATE_LIMIT_MAX", settings.login_rate_limit_max)?;
        settings.demo_mode = parse_var("DEMO_MODE", false)?;
        settings.environment = match optional_var("APP_ENV").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };
        if let Some(addr) = optional_var("BIND_ADDR") {
            settings.bind_addr = addr;
        }

        if settings.admin_password_hash.is_empty() {
            tracing::warn!("ADMIN_PASSWORD_HASH não configurado: nenhum login será aceito");
        }

        Ok(settings)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_var(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{name} tem valor inválido: {raw}")),
        None => Ok(default),
    }
}

// A janela do login é fixa em 15 minutos.
const LOGIN_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings: Arc<Settings>,
    pub i18n_store: Arc<I18nStore>,
    pub session_service: SessionService,
    pub rate_limiter: Arc<dyn RateLimitStore>,
    pub login_rate_limiter: Arc<dyn RateLimitStore>,
    pub client_service: ClientService,
    pub mission_service: MissionService,
    pub objective_service: ObjectiveService,
    pub profile_service: ProfileService,
    pub commission_service: CommissionService,
    pub dashboard_service: DashboardService,
    pub demo_service: DemoService,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar no banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_parts(db_pool, settings))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_parts(db_pool: PgPool, settings: Settings) -> Self {
        let rate_limiter: Arc<dyn RateLimitStore> = Arc::new(InMemoryRateLimiter::new(
            settings.rate_limit_max,
            settings.rate_limit_window,
        ));
        let login_rate_limiter: Arc<dyn RateLimitStore> = Arc::new(InMemoryRateLimiter::new(
            settings.login_rate_limit_max,
            LOGIN_RATE_LIMIT_WINDOW,
        ));
        Self::with_rate_limiters(db_pool, settings, rate_limiter, login_rate_limiter)
    }

    pub fn with_rate_limiters(
        db_pool: PgPool,
        settings: Settings,
        rate_limiter: Arc<dyn RateLimitStore>,
        login_rate_limiter: Arc<dyn RateLimitStore>,
    ) -> Self {
        let session_service = SessionService::new(&settings);

        let client_repo = ClientRepository::new();
        let mission_repo = MissionRepository::new();
        let objective_repo = ObjectiveRepository::new();
        let profile_repo = ProfileRepository::new();
        let commission_repo = CommissionRepository::new();
        let note_repo = NoteRepository::new();

        let demo_service = DemoService::new(
            client_repo.clone(),
            mission_repo.clone(),
            profile_repo.clone(),
            objective_repo.clone(),
            commission_repo.clone(),
            note_repo,
        );

        Self {
            db_pool,
            settings: Arc::new(settings),
            i18n_store: Arc::new(I18nStore::new()),
            session_service,
            rate_limiter,
            login_rate_limiter,
            client_service: ClientService::new(client_repo),
            mission_service: MissionService::new(mission_repo),
            objective_service: ObjectiveService::new(objective_repo),
            profile_service: ProfileService::new(profile_repo),
            commission_service: CommissionService::new(commission_repo),
            dashboard_service: DashboardService::new(DashboardRepository::new()),
            demo_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::new("postgres://localhost/kelio", "secret");
        assert_eq!(settings.admin_username, "admin");
        assert_eq!(settings.rate_limit_max, 100);
        assert_eq!(settings.rate_limit_window, Duration::from_secs(15 * 60));
        assert_eq!(settings.login_rate_limit_max, 5);
        assert!(!settings.demo_mode);
        assert!(!settings.is_production());
    }
}
