// src/middleware.rs

pub mod auth;
pub mod i18n;
pub mod json_body;
pub mod rate_limit;
