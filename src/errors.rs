use crate::db::errors::DbError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// A help article slug that matches nothing
    #[error("Article not found")]
    ArticleNotFound,

    /// A product SEO path (country + category slug + slug) that matches nothing
    #[error("Product not found")]
    ProductNotFound,

    /// A country listing with zero matching products
    #[error("No products found for this country")]
    NoProductsForCountry,

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::ArticleNotFound => StatusCode::NOT_FOUND,
            Error::ProductNotFound => StatusCode::NOT_FOUND,
            Error::NoProductsForCountry => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CircularReference { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, id } => {
                format!("{resource} with ID {id} not found")
            }
            Error::ArticleNotFound => "Article not found".to_string(),
            Error::ProductNotFound => "Product not found.".to_string(),
            Error::NoProductsForCountry => "No products found for this country.".to_string(),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { constraint, table, .. } => {
                    // Friendly messages for the unique constraints clients actually hit
                    match (table.as_deref(), constraint.as_deref()) {
                        (Some("users"), Some(c)) if c.contains("email") => "An account with this email address already exists".to_string(),
                        (Some("categories"), Some(c)) if c.contains("slug") => "A category with this slug already exists".to_string(),
                        (Some("categories"), Some(c)) if c.contains("name") => "A category with this name already exists".to_string(),
                        (Some("products"), Some(c)) if c.contains("slug") => "A product with this slug already exists".to_string(),
                        (Some("help_categories"), _) => "A help category with this name or slug already exists".to_string(),
                        (Some("help_articles"), Some(c)) if c.contains("slug") => "A help article with this slug already exists".to_string(),
                        _ => "Resource already exists".to_string(),
                    }
                }
                DbError::ForeignKeyViolation { .. } => "Invalid reference to related resource".to_string(),
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::CircularReference { entity_type, .. } => {
                    format!("Assigning this parent would make the {entity_type} its own ancestor")
                }
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
            Error::ArticleNotFound | Error::ProductNotFound | Error::NoProductsForCountry => {
                tracing::debug!("Lookup miss: {}", self);
            }
        }

        let status = self.status_code();

        // The empty-country-listing body uses a "message" key; everything else is "error".
        let body = match &self {
            Error::NoProductsForCountry => json!({ "message": self.user_message() }),
            _ => json!({ "error": self.user_message() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Convert from String errors (e.g., from external functions)
impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Internal { operation: msg }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_not_found_bodies() {
        assert_eq!(Error::ArticleNotFound.user_message(), "Article not found");
        assert_eq!(Error::ProductNotFound.user_message(), "Product not found.");
        assert_eq!(Error::NoProductsForCountry.user_message(), "No products found for this country.");
        assert_eq!(Error::ArticleNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::NoProductsForCountry.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_status_mapping() {
        let unique = Error::Database(DbError::UniqueViolation {
            constraint: Some("users_email_key".to_string()),
            table: Some("users".to_string()),
            message: "duplicate key".to_string(),
        });
        assert_eq!(unique.status_code(), StatusCode::CONFLICT);
        assert_eq!(unique.user_message(), "An account with this email address already exists");

        let cycle = Error::Database(DbError::CircularReference {
            entity_type: "category".to_string(),
            id: "abc".to_string(),
        });
        assert_eq!(cycle.status_code(), StatusCode::BAD_REQUEST);
    }
}
