//! Aggregate counts for the health endpoint

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::Repository};

/// Library-wide counters
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Statistics {
    pub total_users: i64,
    pub total_books: i64,
    pub active_loans: i64,
    pub overdue_loans: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Whether the database answers a trivial query
    pub async fn database_reachable(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.repository.pool)
            .await
            .is_ok()
    }

    /// Gather the counters reported by /health
    pub async fn statistics(&self) -> AppResult<Statistics> {
        Ok(Statistics {
            total_users: self.repository.users.count().await?,
            total_books: self.repository.books.count().await?,
            active_loans: self.repository.loans.count_active().await?,
            overdue_loans: self.repository.loans.count_overdue(Utc::now()).await?,
        })
    }
}
