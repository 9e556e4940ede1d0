//! Loan lifecycle service

use chrono::Utc;
use serde_json::json;

use crate::{
    error::AppResult,
    models::audit_log::RecordAudit,
    models::loan::{CreateLoan, Loan, OverdueLoan, ReturnOutcome},
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    audit: AuditService,
}

impl LoansService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    /// Get loan by ID
    pub async fn get_loan(&self, loan_id: i32) -> AppResult<Loan> {
        self.repository.loans.get_by_id(loan_id).await
    }

    /// List all loans
    pub async fn list_loans(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.list().await
    }

    /// Create a new loan (borrow a book)
    pub async fn create_loan(&self, loan: CreateLoan, ip: Option<String>) -> AppResult<Loan> {
        // Verify user exists; book existence and availability are checked
        // inside the repository transaction
        self.repository.users.get_by_id(loan.user_id).await?;

        let created = self.repository.loans.create(&loan, Utc::now()).await?;

        let entry = RecordAudit {
            action: "CREATE_LOAN".to_string(),
            entity_type: "Loan".to_string(),
            entity_id: created.id,
            user_id: Some(created.user_id),
            details: Some(json!({
                "user_id": created.user_id,
                "book_id": created.book_id,
                "due_date": created.due_date,
            })),
            ip_address: ip,
        };
        if let Err(e) = self.audit.record(entry).await {
            tracing::warn!(loan_id = created.id, "Audit write failed for CREATE_LOAN: {}", e);
        }

        Ok(created)
    }

    /// Return a borrowed book, finalizing the fine
    pub async fn return_loan(&self, loan_id: i32, ip: Option<String>) -> AppResult<ReturnOutcome> {
        let outcome = self.repository.loans.return_loan(loan_id, Utc::now()).await?;

        let entry = RecordAudit {
            action: "RETURN_BOOK".to_string(),
            entity_type: "Loan".to_string(),
            entity_id: outcome.loan.id,
            user_id: Some(outcome.loan.user_id),
            details: Some(json!({
                "days_overdue": outcome.days_overdue,
                "fine": outcome.fine,
            })),
            ip_address: ip,
        };
        if let Err(e) = self.audit.record(entry).await {
            tracing::warn!(loan_id, "Audit write failed for RETURN_BOOK: {}", e);
        }

        Ok(outcome)
    }

    /// List overdue loans with projected fines, oldest due date first
    pub async fn list_overdue(&self) -> AppResult<Vec<OverdueLoan>> {
        self.repository.loans.list_overdue(Utc::now()).await
    }
}
