//! Library Circulation Server
//!
//! A REST JSON API for tracking library patrons, a book catalog, loan
//! transactions with due dates and capped daily fines, and an append-only
//! audit trail.

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
}
