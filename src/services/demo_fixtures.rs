// src/services/demo_fixtures.rs
//
// Conjunto fixo de dados fictícios carregado por POST /api/demo/load.

use crate::models::{
    auth::Role,
    demo::{ClientFixture, MissionFixture, NoteFixture, NoteTarget, ObjectiveFixture, ProfileFixture},
    mission::MissionStatus,
};

/// Sufixo reservado dos perfis sintéticos; é por ele que o clear os encontra.
pub const DEMO_EMAIL_DOMAIN: &str = "@kelio-demo.local";

pub const CLIENTS: &[ClientFixture] = &[
    ClientFixture {
        label: "techcorp",
        name: "TechCorp Solutions",
        email: "contact@techcorp.com",
        phone: "+33 1 23 45 67 89",
        company: "TechCorp Solutions SAS",
        notes: "Client premium avec de gros projets en cours. Très satisfait de nos services.",
    },
    ClientFixture {
        label: "startup",
        name: "StartupInnovante",
        email: "hello@startupinnovante.fr",
        phone: "+33 6 78 90 12 34",
        company: "StartupInnovante SARL",
        notes: "Startup dynamique, besoins variés en développement mobile et web.",
    },
    ClientFixture {
        label: "grand-groupe",
        name: "Grand Groupe International",
        email: "projets@grandgroupe.com",
        phone: "+33 1 98 76 54 32",
        company: "Grand Groupe International SA",
        notes: "Multinational avec des projets complexes. Processus de validation long mais budgets importants.",
    },
    ClientFixture {
        label: "pme",
        name: "PME Familiale",
        email: "direction@pmefamiliale.fr",
        phone: "+33 4 56 78 90 12",
        company: "PME Familiale & Fils",
        notes: "Entreprise familiale traditionnelle en cours de digitalisation.",
    },
    ClientFixture {
        label: "ecotech",
        name: "Association EcoTech",
        email: "contact@ecotech-asso.org",
        phone: "+33 5 43 21 09 87",
        company: "Association EcoTech",
        notes: "Association environnementale, projets à impact social.",
    },
];

pub const MISSIONS: &[MissionFixture] = &[
    MissionFixture {
        label: "app-mobile",
        client: "techcorp",
        title: "Développement App Mobile E-commerce",
        description: "Création d'une application mobile native pour la vente en ligne avec paiement intégré",
        total_amount: 45_000,
        deadline: "2025-09-15",
        status: MissionStatus::InProgress,
    },
    MissionFixture {
        label: "site-corporate",
        client: "startup",
        title: "Refonte Site Web Corporate",
        description: "Modernisation complète du site web avec nouveau design et CMS",
        total_amount: 28_000,
        deadline: "2025-08-30",
        status: MissionStatus::Pending,
    },
    MissionFixture {
        label: "erp",
        client: "grand-groupe",
        title: "Système de Gestion Interne",
        description: "Développement d'un ERP personnalisé pour la gestion des ressources",
        total_amount: 120_000,
        deadline: "2025-12-31",
        status: MissionStatus::InProgress,
    },
    MissionFixture {
        label: "boutique",
        client: "pme",
        title: "Boutique en Ligne",
        description: "Création d'une boutique e-commerce avec catalogue produits",
        total_amount: 18_000,
        deadline: "2025-07-20",
        status: MissionStatus::Completed,
    },
    MissionFixture {
        label: "plateforme",
        client: "ecotech",
        title: "Plateforme Collaborative",
        description: "Développement d'une plateforme de collaboration pour les membres",
        total_amount: 35_000,
        deadline: "2025-10-15",
        status: MissionStatus::InProgress,
    },
    MissionFixture {
        label: "cloud",
        client: "techcorp",
        title: "Migration Cloud",
        description: "Migration de l'infrastructure vers le cloud avec optimisation",
        total_amount: 55_000,
        deadline: "2025-11-30",
        status: MissionStatus::Pending,
    },
    MissionFixture {
        label: "iot",
        client: "startup",
        title: "Application IoT",
        description: "Développement d'une application pour gérer des capteurs IoT",
        total_amount: 40_000,
        deadline: "2025-08-15",
        status: MissionStatus::InProgress,
    },
    MissionFixture {
        label: "audit",
        client: "grand-groupe",
        title: "Audit Sécurité",
        description: "Audit complet de sécurité et mise en conformité RGPD",
        total_amount: 15_000,
        deadline: "2025-07-30",
        status: MissionStatus::Completed,
    },
];

// O primeiro perfil é o dono dos objetivos.
pub const PROFILES: &[ProfileFixture] = &[
    ProfileFixture {
        id: 0x6b656c69_6f00_4d00_8000_000000000001,
        email: "demo1@kelio-demo.local",
        full_name: "Demo User 1",
        role: Role::Commercial,
        commission_percentage: (85, 1),
    },
    ProfileFixture {
        id: 0x6b656c69_6f00_4d00_8000_000000000002,
        email: "demo2@kelio-demo.local",
        full_name: "Demo User 2",
        role: Role::Commercial,
        commission_percentage: (60, 1),
    },
];

pub const OBJECTIVES: &[ObjectiveFixture] = &[
    ObjectiveFixture { month: "07", year: 2025, target_missions: 8, target_revenue: 150_000 },
    ObjectiveFixture { month: "08", year: 2025, target_missions: 10, target_revenue: 180_000 },
    ObjectiveFixture { month: "09", year: 2025, target_missions: 12, target_revenue: 200_000 },
    ObjectiveFixture { month: "10", year: 2025, target_missions: 9, target_revenue: 170_000 },
    ObjectiveFixture { month: "11", year: 2025, target_missions: 14, target_revenue: 220_000 },
    ObjectiveFixture { month: "12", year: 2025, target_missions: 15, target_revenue: 250_000 },
];

pub const NOTES: &[NoteFixture] = &[
    NoteFixture {
        target: NoteTarget::Client("techcorp"),
        content: "Client très réactif, apprécie la communication régulière. Préfère les réunions en fin de journée.",
        is_important: true,
    },
    NoteFixture {
        target: NoteTarget::Client("startup"),
        content: "Startup en croissance rapide, besoins évolutifs. Rester flexible sur les spécifications.",
        is_important: false,
    },
    NoteFixture {
        target: NoteTarget::Mission("app-mobile"),
        content: "Attention aux délais serrés pour les tests utilisateur. Prévoir une phase de validation supplémentaire.",
        is_important: true,
    },
    NoteFixture {
        target: NoteTarget::Mission("erp"),
        content: "Projet complexe nécessitant une documentation détaillée. Client très exigeant sur la qualité.",
        is_important: true,
    },
    NoteFixture {
        target: NoteTarget::Client("ecotech"),
        content: "Association avec budget limité mais projet très motivant. Possibilité de réduction tarifaire.",
        is_important: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_reference_points_at_a_declared_label() {
        let clients: HashSet<_> = CLIENTS.iter().map(|c| c.label).collect();
        let missions: HashSet<_> = MISSIONS.iter().map(|m| m.label).collect();

        assert_eq!(clients.len(), CLIENTS.len(), "rótulo de cliente repetido");
        assert_eq!(missions.len(), MISSIONS.len(), "rótulo de missão repetido");

        for mission in MISSIONS {
            assert!(clients.contains(mission.client), "{} -> {}", mission.label, mission.client);
        }
        for note in NOTES {
            match note.target {
                NoteTarget::Client(label) => assert!(clients.contains(label)),
                NoteTarget::Mission(label) => assert!(missions.contains(label)),
            }
        }
    }

    #[test]
    fn demo_profiles_use_the_reserved_domain() {
        assert!(PROFILES.iter().all(|p| p.email.ends_with(DEMO_EMAIL_DOMAIN)));
    }

    #[test]
    fn fixture_dates_parse() {
        for mission in MISSIONS {
            assert!(chrono::NaiveDate::parse_from_str(mission.deadline, "%Y-%m-%d").is_ok());
        }
    }
}
