//! Lighthouse Library Server
//!
//! A REST JSON API for a small library domain: users, books, genres,
//! authors, lenders and libraries, with soft-delete semantics and
//! referential integrity checks on deletion.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    /// Kept alongside the services for readiness probes.
    pub pool: sqlx::PgPool,
}
