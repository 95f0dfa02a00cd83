/// Generic per-tenant application settings

pub mod repository;

pub use repository::{Setting, SettingsRepository, SETTINGS_DDL};
