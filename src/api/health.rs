//! Health check endpoint

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::stats::Statistics};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Database connectivity
    pub database: String,
    /// Library-wide counters
    pub statistics: Option<Statistics>,
    pub timestamp: DateTime<Utc>,
}

/// Health check endpoint with database probe and statistics
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health report", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<crate::AppState>) -> AppResult<Json<HealthResponse>> {
    let connected = state.services.stats.database_reachable().await;

    let (status, database, statistics) = if connected {
        let statistics = state.services.stats.statistics().await?;
        ("healthy", "connected", Some(statistics))
    } else {
        ("degraded", "unavailable", None)
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        statistics,
        timestamp: Utc::now(),
    }))
}
