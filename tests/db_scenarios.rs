// tests/db_scenarios.rs
//
// Cenários contra um Postgres de verdade. Rodar com:
//   DATABASE_URL=postgres://... cargo test -- --ignored

use std::time::Duration;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use kelio_gestion::{
    common::error::AppError,
    config::{AppState, Settings},
    models::{
        auth::OwnerScope,
        client::{ClientChanges, ClientData},
        mission::{MissionChanges, MissionData, MissionFilter, MissionStatus},
        objective::{ObjectiveData, ObjectiveFilter},
    },
    services::demo_fixtures::CLIENTS,
};

fn state(pool: PgPool) -> AppState {
    AppState::from_parts(pool, Settings::new("postgres://unused", "test-secret"))
}

async fn admin_owner(state: &AppState) -> Uuid {
    let id = Uuid::new_v4();
    state
        .profile_service
        .ensure_admin_profile(&state.db_pool, id, "admin@kelio.test", "admin")
        .await
        .unwrap();
    id
}

fn mission_for(client_id: Uuid, total_amount: Decimal) -> MissionData {
    MissionData {
        title: "Audit".to_string(),
        description: None,
        client_id,
        deadline: None,
        total_amount,
        advance_amount: Decimal::ZERO,
        status: MissionStatus::Pending,
        notes: None,
    }
}

async fn count(pool: &PgPool, sql: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await.unwrap()
}

fn acme() -> ClientData {
    ClientData {
        name: "Acme".to_string(),
        email: Some("contact@acme.fr".to_string()),
        phone: None,
        company: Some("Acme SAS".to_string()),
        notes: None,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn archived_clients_leave_the_listing(pool: PgPool) {
    let state = state(pool);
    let owner = OwnerScope::Owner(admin_owner(&state).await);

    let client = state.client_service.create(&state.db_pool, &acme(), owner).await.unwrap();
    let listed = state.client_service.list(&state.db_pool, Some("acme")).await.unwrap();
    assert_eq!(listed.len(), 1);

    let archived = state.client_service.archive(&state.db_pool, client.id, owner).await.unwrap();
    assert!(archived.archived);
    assert!(state.client_service.list(&state.db_pool, None).await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn second_objective_for_the_same_month_conflicts(pool: PgPool) {
    let state = state(pool);
    let owner = OwnerScope::Owner(admin_owner(&state).await);
    let data = ObjectiveData {
        month: "03".to_string(),
        year: 2025,
        target_missions: 10,
        target_revenue: Decimal::from(50_000),
    };

    state.objective_service.create(&state.db_pool, &data, owner).await.unwrap();
    let err = state.objective_service.create(&state.db_pool, &data, owner).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict("objective_exists")));

    let filter = ObjectiveFilter { year: Some(2025), ..Default::default() };
    assert_eq!(state.objective_service.list(&state.db_pool, &filter).await.unwrap().len(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn one_commission_per_profile(pool: PgPool) {
    let state = state(pool);
    let user_id = admin_owner(&state).await;

    let created = state
        .commission_service
        .create(&state.db_pool, user_id, Decimal::new(85, 1))
        .await
        .unwrap();
    assert_eq!(created.setting.commission_percentage, Decimal::new(85, 1));

    let err = state
        .commission_service
        .create(&state.db_pool, user_id, Decimal::from(5))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict("commission_exists")));

    // O 409 não mexe no percentual existente
    let stored = state.commission_service.list(&state.db_pool, Some(user_id)).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].setting.commission_percentage, Decimal::new(85, 1));

    let unknown = state
        .commission_service
        .create(&state.db_pool, Uuid::new_v4(), Decimal::from(5))
        .await
        .unwrap_err();
    assert!(matches!(unknown, AppError::InvalidField { field: "user_id", .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn demo_load_then_clear_leaves_real_data_alone(pool: PgPool) {
    let state = state(pool);
    let owner = OwnerScope::Owner(admin_owner(&state).await);
    let real = state.client_service.create(&state.db_pool, &acme(), owner).await.unwrap();

    let loaded = state.demo_service.load(&state.db_pool).await.unwrap();
    assert_eq!(loaded.clients, 5);
    assert_eq!(loaded.missions, 8);
    assert_eq!(loaded.profiles, 2);
    assert_eq!(loaded.objectives, 6);

    let cleared = state.demo_service.clear(&state.db_pool).await.unwrap();
    assert_eq!(cleared.clients, 5);
    assert_eq!(cleared.missions, 8);
    assert_eq!(cleared.profiles, 2);

    assert_eq!(count(&state.db_pool, "SELECT COUNT(*) FROM clients WHERE created_by IS NULL").await, 0);
    assert_eq!(count(&state.db_pool, "SELECT COUNT(*) FROM missions WHERE created_by IS NULL").await, 0);
    assert_eq!(
        count(&state.db_pool, "SELECT COUNT(*) FROM profiles WHERE email LIKE '%@kelio-demo.local'").await,
        0
    );

    let remaining = state.client_service.list(&state.db_pool, None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, real.id);

    // Segunda limpeza não encontra nada
    let again = state.demo_service.clear(&state.db_pool).await.unwrap();
    assert_eq!(again.clients, 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn demo_clear_keeps_owned_missions_on_demo_clients(pool: PgPool) {
    let state = state(pool);
    let owner = OwnerScope::Owner(admin_owner(&state).await);
    state.demo_service.load(&state.db_pool).await.unwrap();

    let techcorp: Uuid = sqlx::query_scalar("SELECT id FROM clients WHERE created_by IS NULL AND name = $1")
        .bind(CLIENTS[0].name)
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
    let owned = state
        .mission_service
        .create(&state.db_pool, &mission_for(techcorp, Decimal::from(1_200)), owner)
        .await
        .unwrap();

    let cleared = state.demo_service.clear(&state.db_pool).await.unwrap();
    assert_eq!(cleared.missions, 8);
    assert_eq!(cleared.clients, 4);

    let filter = MissionFilter { client_id: Some(techcorp), ..Default::default() };
    let left = state.mission_service.list(&state.db_pool, &filter).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].mission.id, owned.mission.id);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn empty_patch_only_touches_updated_at(pool: PgPool) {
    let state = state(pool);
    let owner = OwnerScope::Owner(admin_owner(&state).await);
    let before = state.client_service.create(&state.db_pool, &acme(), owner).await.unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    let after = state
        .client_service
        .update_partial(&state.db_pool, before.id, &ClientChanges::default(), owner)
        .await
        .unwrap();

    assert_eq!(after.name, before.name);
    assert_eq!(after.email, before.email);
    assert_eq!(after.company, before.company);
    assert_eq!(after.archived, before.archived);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn missing_missions_are_404_on_every_write(pool: PgPool) {
    let state = state(pool);
    let owner = OwnerScope::Owner(admin_owner(&state).await);
    let client = state.client_service.create(&state.db_pool, &acme(), owner).await.unwrap();
    let missing = Uuid::new_v4();

    let replaced = state
        .mission_service
        .replace(&state.db_pool, missing, &mission_for(client.id, Decimal::from(10)))
        .await;
    assert!(matches!(replaced, Err(AppError::NotFound("mission_not_found"))));

    let patched = state
        .mission_service
        .update_partial(&state.db_pool, missing, &MissionChanges::default())
        .await;
    assert!(matches!(patched, Err(AppError::NotFound("mission_not_found"))));

    let deleted = state.mission_service.delete(&state.db_pool, missing).await;
    assert!(matches!(deleted, Err(AppError::NotFound("mission_not_found"))));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn amount_overflowing_the_column_is_a_client_error(pool: PgPool) {
    let state = state(pool);
    let owner = OwnerScope::Owner(admin_owner(&state).await);
    let client = state.client_service.create(&state.db_pool, &acme(), owner).await.unwrap();

    let err = state
        .mission_service
        .create(&state.db_pool, &mission_for(client.id, Decimal::from(10_000_000_000_000i64)), owner)
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn search_treats_percent_as_text(pool: PgPool) {
    let state = state(pool);
    let owner = OwnerScope::Owner(admin_owner(&state).await);
    state.client_service.create(&state.db_pool, &acme(), owner).await.unwrap();

    assert!(state.client_service.list(&state.db_pool, Some("%")).await.unwrap().is_empty());
    assert_eq!(state.client_service.list(&state.db_pool, Some("acme")).await.unwrap().len(), 1);
}
