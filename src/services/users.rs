//! Patron management service

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::audit_log::RecordAudit,
    models::user::{CreateUser, User, UserDetail},
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    audit: AuditService,
}

impl UsersService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Register a new patron or librarian
    pub async fn create_user(&self, user: CreateUser, ip: Option<String>) -> AppResult<User> {
        user.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let created = self.repository.users.create(&user).await?;

        let entry = RecordAudit {
            action: "CREATE_USER".to_string(),
            entity_type: "User".to_string(),
            entity_id: created.id,
            user_id: None,
            details: Some(json!({
                "username": created.username,
                "role": created.role,
            })),
            ip_address: ip,
        };
        if let Err(e) = self.audit.record(entry).await {
            tracing::warn!(user_id = created.id, "Audit write failed for CREATE_USER: {}", e);
        }

        Ok(created)
    }

    /// Get a user with their active loans and the fines those loans would
    /// incur if all were returned now
    pub async fn get_user_detail(&self, user_id: i32) -> AppResult<UserDetail> {
        let user = self.repository.users.get_by_id(user_id).await?;
        let active_loans = self
            .repository
            .loans
            .list_active_for_user(user_id, Utc::now())
            .await?;

        let total_potential_fines: Decimal =
            active_loans.iter().map(|loan| loan.potential_fine).sum();

        Ok(UserDetail {
            user,
            active_loans,
            total_potential_fines,
        })
    }
}
