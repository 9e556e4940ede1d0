//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: i32,
    pub available_copies: i32,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    #[validate(length(min = 10, max = 20, message = "ISBN must be 10-20 characters"))]
    pub isbn: String,
    /// Number of copies acquired, defaults to 1
    #[validate(range(min = 1, message = "total_copies must be at least 1"))]
    pub total_copies: Option<i32>,
}

/// Inventory update request: adds a copy delta to both total and available
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub add_copies: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_book_validation() {
        let valid = CreateBook {
            title: "The Name of the Rose".to_string(),
            author: "Umberto Eco".to_string(),
            isbn: "978-0-15-144647-6".to_string(),
            total_copies: Some(3),
        };
        assert!(valid.validate().is_ok());

        let zero_copies = CreateBook {
            total_copies: Some(0),
            ..valid_book()
        };
        assert!(zero_copies.validate().is_err());

        let short_isbn = CreateBook {
            isbn: "123".to_string(),
            ..valid_book()
        };
        assert!(short_isbn.validate().is_err());
    }

    fn valid_book() -> CreateBook {
        CreateBook {
            title: "The Name of the Rose".to_string(),
            author: "Umberto Eco".to_string(),
            isbn: "978-0-15-144647-6".to_string(),
            total_copies: None,
        }
    }
}
