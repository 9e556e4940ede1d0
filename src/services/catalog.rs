//! Catalog management service

use serde_json::json;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::audit_log::RecordAudit,
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    audit: AuditService,
}

impl CatalogService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Add a new book to the catalog
    pub async fn create_book(&self, book: CreateBook, ip: Option<String>) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let created = self.repository.books.create(&book).await?;

        let entry = RecordAudit {
            action: "CREATE_BOOK".to_string(),
            entity_type: "Book".to_string(),
            entity_id: created.id,
            user_id: None,
            details: Some(json!({
                "isbn": created.isbn,
                "total_copies": created.total_copies,
            })),
            ip_address: ip,
        };
        if let Err(e) = self.audit.record(entry).await {
            tracing::warn!(book_id = created.id, "Audit write failed for CREATE_BOOK: {}", e);
        }

        Ok(created)
    }

    /// Adjust the inventory of a book by a copy delta
    pub async fn update_book(
        &self,
        id: i32,
        update: UpdateBook,
        ip: Option<String>,
    ) -> AppResult<Book> {
        let updated = self.repository.books.add_copies(id, update.add_copies).await?;

        let entry = RecordAudit {
            action: "UPDATE_BOOK".to_string(),
            entity_type: "Book".to_string(),
            entity_id: updated.id,
            user_id: None,
            details: Some(json!({
                "delta": update.add_copies,
                "total_copies": updated.total_copies,
                "available_copies": updated.available_copies,
            })),
            ip_address: ip,
        };
        if let Err(e) = self.audit.record(entry).await {
            tracing::warn!(book_id = updated.id, "Audit write failed for UPDATE_BOOK: {}", e);
        }

        Ok(updated)
    }
}
