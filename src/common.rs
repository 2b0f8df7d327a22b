// src/common.rs

pub mod error;
pub mod i18n;
pub mod input;
pub mod response;
