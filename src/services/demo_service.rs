// src/services/demo_service.rs
//
// Carrega e remove o conjunto de demonstração. Cada etapa comita sozinha;
// nenhuma transação atravessa etapas.

use std::collections::HashMap;

use anyhow::anyhow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{is_missing_table, AppError},
    db::{
        ClientRepository, CommissionRepository, MissionRepository, NoteRepository,
        ObjectiveRepository, ProfileRepository,
    },
    models::{
        client::ClientData,
        demo::{DemoClearSummary, DemoLoadSummary, NoteTarget},
        mission::MissionData,
        objective::ObjectiveData,
    },
    services::demo_fixtures::{CLIENTS, DEMO_EMAIL_DOMAIN, MISSIONS, NOTES, OBJECTIVES, PROFILES},
};

type LabelMap = HashMap<&'static str, Uuid>;

fn resolve(labels: &LabelMap, kind: &str, label: &str) -> Result<Uuid, AppError> {
    labels
        .get(label)
        .copied()
        .ok_or_else(|| AppError::InternalServerError(anyhow!("{kind} de demo sem rótulo '{label}'")))
}

// Etapa opcional: falha vira aviso e conta zero.
fn optional_step(step: &str, result: Result<u64, AppError>) -> u64 {
    match result {
        Ok(count) => {
            tracing::info!("Demo: {} {}", count, step);
            count
        }
        Err(e) => {
            tracing::warn!("⚠️ Demo: etapa '{}' ignorada: {:?}", step, e);
            0
        }
    }
}

// Etapa obrigatória do clear: só a ausência da tabela é tolerada.
fn required_delete(step: &str, result: Result<u64, AppError>) -> Result<u64, AppError> {
    match result {
        Ok(count) => {
            tracing::info!("Demo: {} {} removidos", count, step);
            Ok(count)
        }
        Err(AppError::DatabaseError(ref e)) if is_missing_table(e) => {
            tracing::warn!("Demo: tabela de {} não existe", step);
            Ok(0)
        }
        Err(e) => {
            tracing::error!("Demo: falha ao remover {}: {:?}", step, e);
            Err(e)
        }
    }
}

#[derive(Clone)]
pub struct DemoService {
    client_repo: ClientRepository,
    mission_repo: MissionRepository,
    profile_repo: ProfileRepository,
    objective_repo: ObjectiveRepository,
    commission_repo: CommissionRepository,
    note_repo: NoteRepository,
}

impl DemoService {
    pub fn new(
        client_repo: ClientRepository,
        mission_repo: MissionRepository,
        profile_repo: ProfileRepository,
        objective_repo: ObjectiveRepository,
        commission_repo: CommissionRepository,
        note_repo: NoteRepository,
    ) -> Self {
        Self {
            client_repo,
            mission_repo,
            profile_repo,
            objective_repo,
            commission_repo,
            note_repo,
        }
    }

    pub async fn load(&self, pool: &PgPool) -> Result<DemoLoadSummary, AppError> {
        let mut summary = DemoLoadSummary::default();

        // 1. Clientes e 2. missões: obrigatórios
        let clients = self.load_clients(pool).await.inspect_err(|e| {
            tracing::error!("Demo: falha ao carregar clientes: {:?}", e);
        })?;
        summary.clients = clients.len() as u64;

        let missions = self.load_missions(pool, &clients).await.inspect_err(|e| {
            tracing::error!("Demo: falha ao carregar missões: {:?}", e);
        })?;
        summary.missions = missions.len() as u64;

        // 3. Perfis sintéticos, só para satisfazer as FKs abaixo
        let profile_ids = match self.load_profiles(pool).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("⚠️ Demo: etapa 'perfis' ignorada: {:?}", e);
                Vec::new()
            }
        };
        summary.profiles = profile_ids.len() as u64;

        // 4. Objetivos do primeiro perfil, 5. comissões
        summary.objectives = match profile_ids.first() {
            Some(owner_id) => optional_step("objetivos", self.load_objectives(pool, *owner_id).await),
            None => 0,
        };
        summary.commission_settings = if profile_ids.is_empty() {
            0
        } else {
            optional_step("comissões", self.load_commissions(pool, &profile_ids).await)
        };

        // 6. Notas
        summary.notes = optional_step("notas", self.load_notes(pool, &clients, &missions).await);

        tracing::info!("✅ Dados de demonstração carregados: {:?}", summary);
        Ok(summary)
    }

    async fn load_clients(&self, pool: &PgPool) -> Result<LabelMap, AppError> {
        let mut tx = pool.begin().await?;
        let mut ids = LabelMap::new();

        for fixture in CLIENTS {
            let data = ClientData {
                name: fixture.name.to_string(),
                email: Some(fixture.email.to_string()),
                phone: Some(fixture.phone.to_string()),
                company: Some(fixture.company.to_string()),
                notes: Some(fixture.notes.to_string()),
            };
            let client = self.client_repo.create(&mut *tx, &data, None).await?;
            ids.insert(fixture.label, client.id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn load_missions(&self, pool: &PgPool, clients: &LabelMap) -> Result<LabelMap, AppError> {
        let mut tx = pool.begin().await?;
        let mut ids = LabelMap::new();

        for fixture in MISSIONS {
            let deadline = NaiveDate::parse_from_str(fixture.deadline, "%Y-%m-%d")
                .map_err(|e| anyhow!("data inválida na missão de demo '{}': {}", fixture.label, e))?;

            let data = MissionData {
                title: fixture.title.to_string(),
                description: Some(fixture.description.to_string()),
                client_id: resolve(clients, "cliente", fixture.client)?,
                deadline: Some(deadline),
                total_amount: Decimal::from(fixture.total_amount),
                advance_amount: Decimal::ZERO,
                status: fixture.status,
                notes: None,
            };
            let row = self.mission_repo.create(&mut *tx, &data, None).await?;
            ids.insert(fixture.label, row.mission.id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn load_profiles(&self, pool: &PgPool) -> Result<Vec<Uuid>, AppError> {
        let mut tx = pool.begin().await?;
        let mut ids = Vec::with_capacity(PROFILES.len());

        for fixture in PROFILES {
            let profile = self
                .profile_repo
                .upsert(&mut *tx, Uuid::from_u128(fixture.id), fixture.email, Some(fixture.full_name), fixture.role)
                .await?;
            ids.push(profile.id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn load_objectives(&self, pool: &PgPool, owner_id: Uuid) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;

        for fixture in OBJECTIVES {
            let data = ObjectiveData {
                month: fixture.month.to_string(),
                year: fixture.year,
                target_missions: fixture.target_missions,
                target_revenue: Decimal::from(fixture.target_revenue),
            };
            self.objective_repo.create(&mut *tx, &data, Some(owner_id)).await?;
        }

        tx.commit().await?;
        Ok(OBJECTIVES.len() as u64)
    }

    async fn load_commissions(&self, pool: &PgPool, profile_ids: &[Uuid]) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;
        let mut count = 0;

        for (fixture, user_id) in PROFILES.iter().zip(profile_ids) {
            let (mantissa, scale) = fixture.commission_percentage;
            self.commission_repo
                .create(&mut *tx, *user_id, Decimal::new(mantissa, scale))
                .await?;
            count += 1;
        }

        tx.commit().await?;
        Ok(count)
    }

    async fn load_notes(&self, pool: &PgPool, clients: &LabelMap, missions: &LabelMap) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;

        for fixture in NOTES {
            let (client_id, mission_id) = match fixture.target {
                NoteTarget::Client(label) => (Some(resolve(clients, "cliente", label)?), None),
                NoteTarget::Mission(label) => (None, Some(resolve(missions, "missão", label)?)),
            };
            self.note_repo
                .create(&mut *tx, client_id, mission_id, fixture.content, fixture.is_important, None)
                .await?;
        }

        tx.commit().await?;
        Ok(NOTES.len() as u64)
    }

    /// Ordem inversa das dependências. Idempotente.
    pub async fn clear(&self, pool: &PgPool) -> Result<DemoClearSummary, AppError> {
        let mut summary = DemoClearSummary::default();

        summary.notes = optional_step("notas removidas", self.note_repo.delete_unowned(pool).await);

        let demo_profile_ids = match self.profile_repo.ids_by_email_suffix(pool, DEMO_EMAIL_DOMAIN).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("⚠️ Demo: perfis de demo não encontrados: {:?}", e);
                Vec::new()
            }
        };

        if !demo_profile_ids.is_empty() {
            summary.commission_settings = optional_step(
                "comissões removidas",
                self.commission_repo.delete_by_users(pool, &demo_profile_ids).await,
            );
            summary.objectives = optional_step(
                "objetivos removidos",
                self.objective_repo.delete_by_owners(pool, &demo_profile_ids).await,
            );
        }

        summary.missions = required_delete("missões", self.mission_repo.delete_unowned(pool).await)?;
        summary.clients = required_delete("clientes", self.client_repo.delete_unowned(pool).await)?;

        summary.profiles = optional_step(
            "perfis removidos",
            self.profile_repo.delete_by_email_suffix(pool, DEMO_EMAIL_DOMAIN).await,
        );

        tracing::info!("🧹 Dados de demonstração removidos: {:?}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_label_is_an_internal_error() {
        let mut labels = LabelMap::new();
        labels.insert("techcorp", Uuid::nil());

        assert_eq!(resolve(&labels, "cliente", "techcorp").unwrap(), Uuid::nil());
        assert!(matches!(
            resolve(&labels, "cliente", "acme"),
            Err(AppError::InternalServerError(_))
        ));
    }

    #[test]
    fn optional_failures_count_zero() {
        assert_eq!(optional_step("notas", Ok(5)), 5);
        assert_eq!(optional_step("notas", Err(AppError::NotFound("x"))), 0);
    }

    #[test]
    fn required_delete_propagates_real_errors() {
        assert_eq!(required_delete("missões", Ok(3)).unwrap(), 3);
        assert!(required_delete("missões", Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut))).is_err());
    }
}
