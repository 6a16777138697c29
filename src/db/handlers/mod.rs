//! Repository implementations for database access.
//!
//! This module provides repository structs for each major entity in the system.
//! Repositories follow a consistent pattern and implement the [`Repository`] trait.
//!
//! # Design Pattern
//!
//! Each repository:
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed CRUD operations
//! - Handles query construction and parameter binding
//! - Returns domain models from [`crate::db::models`]
//!
//! # Available Repositories
//!
//! - [`Users`]: User account management
//! - [`Categories`]: Product category tree (path traversal, cycle rejection)
//! - [`Products`]: Product catalog (country filtering, SEO path lookups)
//! - [`HelpCategories`]: Help knowledge base categories
//! - [`HelpArticles`]: Help articles (slug lookup, title search)
//!
//! # Common Pattern
//!
//! All repositories follow this usage pattern:
//!
//! ```ignore
//! use storefront::db::handlers::{Repository, Users, users::UserFilter};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Users::new(&mut conn);
//!     let users = repo.list(&UserFilter::new(0, 10)).await?;
//!     Ok(())
//! }
//! ```

pub mod categories;
pub mod help_articles;
pub mod help_categories;
pub mod products;
pub mod repository;
pub mod users;

pub use categories::Categories;
pub use help_articles::HelpArticles;
pub use help_categories::HelpCategories;
pub use products::Products;
pub use repository::Repository;
pub use users::Users;
