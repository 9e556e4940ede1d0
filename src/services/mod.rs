//! Business logic services

pub mod audit;
pub mod catalog;
pub mod loans;
pub mod stats;
pub mod users;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub audit: audit::AuditService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let audit = audit::AuditService::new(repository.clone());
        Self {
            users: users::UsersService::new(repository.clone(), audit.clone()),
            catalog: catalog::CatalogService::new(repository.clone(), audit.clone()),
            loans: loans::LoansService::new(repository.clone(), audit.clone()),
            stats: stats::StatsService::new(repository),
            audit,
        }
    }
}
