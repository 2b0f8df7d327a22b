// src/services.rs

pub mod auth;
pub mod client_service;
pub use client_service::ClientService;
pub mod mission_service;
pub use mission_service::MissionService;
pub mod objective_service;
pub use objective_service::ObjectiveService;
pub mod profile_service;
pub use profile_service::ProfileService;
pub mod commission_service;
pub use commission_service::CommissionService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod demo_fixtures;
pub mod demo_service;
pub use demo_service::DemoService;
