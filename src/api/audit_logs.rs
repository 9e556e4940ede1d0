//! Audit trail endpoints (read-only)

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::audit_log::{AuditLog, AuditQuery},
};

/// List audit entries, filterable by entity and actor
#[utoipa::path(
    get,
    path = "/audit-logs",
    tag = "audit",
    params(AuditQuery),
    responses(
        (status = 200, description = "Audit entries, oldest first", body = Vec<AuditLog>)
    )
)]
pub async fn list_audit_logs(
    State(state): State<crate::AppState>,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<Vec<AuditLog>>> {
    let entries = state.services.audit.search(&query).await?;
    Ok(Json(entries))
}

/// Get a single audit entry
#[utoipa::path(
    get,
    path = "/audit-logs/{id}",
    tag = "audit",
    params(
        ("id" = i32, Path, description = "Audit log ID")
    ),
    responses(
        (status = 200, description = "Audit entry", body = AuditLog),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn get_audit_log(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuditLog>> {
    let entry = state.services.audit.get_by_id(id).await?;
    Ok(Json(entry))
}
