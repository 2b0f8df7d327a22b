// src/models.rs

pub mod auth;
pub mod client;
pub mod commission;
pub mod dashboard;
pub mod demo;
pub mod mission;
pub mod note;
pub mod objective;
pub mod profile;
