// src/docs.rs

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::common;
use crate::handlers;
use crate::models;
use crate::services::auth::SESSION_COOKIE;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::health,

        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,

        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::create_client,
        handlers::clients::replace_client,
        handlers::clients::patch_client,
        handlers::clients::archive_client,

        // --- Missions ---
        handlers::missions::list_missions,
        handlers::missions::create_mission,
        handlers::missions::replace_mission,
        handlers::missions::patch_mission,
        handlers::missions::delete_mission,

        // --- Objectives ---
        handlers::objectives::list_objectives,
        handlers::objectives::create_objective,
        handlers::objectives::replace_objective,
        handlers::objectives::delete_objective,

        // --- Profiles ---
        handlers::profiles::list_profiles,
        handlers::profiles::update_profile,
        handlers::profiles::delete_profile,

        // --- Commission Settings ---
        handlers::commission_settings::list_commission_settings,
        handlers::commission_settings::create_commission_setting,
        handlers::commission_settings::update_commission_setting,
        handlers::commission_settings::delete_commission_setting,

        // --- Dashboard ---
        handlers::dashboard::get_stats,

        // --- Demo ---
        handlers::demo::load_demo,
        handlers::demo::clear_demo,
    ),
    components(
        schemas(
            common::response::Deleted,

            // --- Auth ---
            models::auth::Role,
            models::auth::Identity,
            models::auth::LoginPayload,
            models::auth::LoginResponse,

            // --- Clients ---
            models::client::Client,
            handlers::clients::ClientPayload,
            handlers::clients::PatchClientPayload,

            // --- Missions ---
            models::mission::MissionStatus,
            models::mission::Mission,
            models::mission::ClientSummary,
            models::mission::MissionWithClient,
            handlers::missions::MissionPayload,
            handlers::missions::PatchMissionPayload,

            // --- Objectives ---
            models::objective::Objective,
            handlers::objectives::ObjectivePayload,

            // --- Profiles ---
            models::profile::Profile,
            handlers::profiles::UpdateProfilePayload,

            // --- Commission Settings ---
            models::commission::CommissionSetting,
            models::commission::ProfileSummary,
            models::commission::CommissionWithProfile,
            handlers::commission_settings::CommissionPayload,

            // --- Dashboard / Demo ---
            models::dashboard::DashboardStats,
            models::demo::DemoLoadSummary,
            models::demo::DemoClearSummary,
        )
    ),
    tags(
        (name = "Health", description = "Estado do servidor"),
        (name = "Auth", description = "Sessão do administrador"),
        (name = "Clients", description = "Carteira de clientes"),
        (name = "Missions", description = "Missões faturáveis por cliente"),
        (name = "Objectives", description = "Metas mensais"),
        (name = "Profiles", description = "Perfis da equipe"),
        (name = "Commission Settings", description = "Percentual de comissão por perfil"),
        (name = "Dashboard", description = "Indicadores gerenciais"),
        (name = "Demo", description = "Dados de demonstração")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/clients",
            "/api/missions",
            "/api/objectives",
            "/api/profiles",
            "/api/commission-settings",
            "/api/demo/load",
            "/api/demo/clear",
            "/api/auth/login",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltando: {path}");
        }
    }
}
