//! Audit log model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Audit log entry from database. Append-only; rows are never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditLog {
    pub id: i32,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i32,
    /// Actor, null when the action was system-initiated
    pub user_id: Option<i32>,
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}

/// New audit entry to append
#[derive(Debug, Clone)]
pub struct RecordAudit {
    pub action: String,
    pub entity_type: String,
    pub entity_id: i32,
    pub user_id: Option<i32>,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}

impl RecordAudit {
    /// Required fields must be non-empty; everything else is free-form.
    pub fn validate(&self) -> AppResult<()> {
        if self.action.trim().is_empty() {
            return Err(AppError::Validation("Audit action must not be empty".to_string()));
        }
        if self.entity_type.trim().is_empty() {
            return Err(AppError::Validation(
                "Audit entity_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Audit log query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AuditQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<i32>,
    pub user_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(action: &str, entity_type: &str) -> RecordAudit {
        RecordAudit {
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: 1,
            user_id: None,
            details: None,
            ip_address: None,
        }
    }

    #[test]
    fn accepts_complete_entry() {
        assert!(entry("CREATE_LOAN", "Loan").validate().is_ok());
    }

    #[test]
    fn rejects_empty_action() {
        assert!(entry("", "Loan").validate().is_err());
        assert!(entry("  ", "Loan").validate().is_err());
    }

    #[test]
    fn rejects_empty_entity_type() {
        assert!(entry("CREATE_LOAN", "").validate().is_err());
    }
}
