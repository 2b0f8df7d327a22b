// src/main.rs

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use kelio_gestion::{
    build_router,
    config::{AppState, Settings},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::from_env()?;
    let bind_addr = settings.bind_addr.clone();

    let app_state = AppState::new(settings)
        .await
        .context("Falha ao inicializar o estado da aplicação")?;

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Perfil dono dos registros criados pelo administrador
    if let Some(profile_id) = app_state.settings.admin_profile_id {
        let profile = app_state
            .profile_service
            .ensure_admin_profile(
                &app_state.db_pool,
                profile_id,
                &app_state.settings.admin_email,
                &app_state.settings.admin_username,
            )
            .await
            .context("Falha ao garantir o perfil do administrador")?;
        tracing::info!("👤 Perfil do administrador: {} ({})", profile.email, profile.id);
    } else {
        tracing::warn!("ADMIN_PROFILE_ID não definido: criações só funcionam com DEMO_MODE=true");
    }

    let app = build_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {bind_addr}"))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("Erro no servidor Axum")?;

    Ok(())
}
