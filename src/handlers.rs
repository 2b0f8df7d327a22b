// src/handlers.rs

pub mod auth;
pub mod clients;
pub mod commission_settings;
pub mod dashboard;
pub mod demo;
pub mod health;
pub mod missions;
pub mod objectives;
pub mod profiles;
