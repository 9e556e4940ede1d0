//! Audit trail service
//!
//! Every mutating operation in the system appends one entry here. Writes are
//! best-effort from the caller's point of view: a failed audit write must be
//! logged at the call site and must not roll back the primary mutation.

use crate::{
    error::AppResult,
    models::audit_log::{AuditLog, AuditQuery, RecordAudit},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
}

impl AuditService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Append an audit entry
    pub async fn record(&self, entry: RecordAudit) -> AppResult<AuditLog> {
        entry.validate()?;
        let created = self.repository.audit_logs.insert(&entry).await?;

        tracing::debug!(
            audit_id = created.id,
            action = %created.action,
            entity_type = %created.entity_type,
            entity_id = created.entity_id,
            "Audit entry recorded"
        );

        Ok(created)
    }

    /// List entries matching the given filters, oldest first
    pub async fn search(&self, query: &AuditQuery) -> AppResult<Vec<AuditLog>> {
        self.repository.audit_logs.search(query).await
    }

    /// Get a single entry by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<AuditLog> {
        self.repository.audit_logs.get_by_id(id).await
    }
}
