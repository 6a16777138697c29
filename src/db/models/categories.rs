//! Database models for the product category tree.

use crate::api::models::categories::{CategoryCreate, CategoryUpdate};
use crate::types::CategoryId;
use sqlx::FromRow;

/// Database request for creating a category.
///
/// A missing slug is derived from the name by the repository.
#[derive(Debug, Clone)]
pub struct CategoryCreateDBRequest {
    pub name: String,
    pub slug: Option<String>,
    pub parent_id: Option<CategoryId>,
}

impl From<CategoryCreate> for CategoryCreateDBRequest {
    fn from(api: CategoryCreate) -> Self {
        Self {
            name: api.name,
            slug: api.slug,
            parent_id: api.parent_id,
        }
    }
}

/// Database request for updating a category. `None` fields are left unchanged;
/// `parent_id` distinguishes "unchanged" (`None`) from "detach from parent"
/// (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdateDBRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<Option<CategoryId>>,
}

impl From<CategoryUpdate> for CategoryUpdateDBRequest {
    fn from(api: CategoryUpdate) -> Self {
        Self {
            name: api.name,
            slug: api.slug,
            parent_id: api.parent_id,
        }
    }
}

/// Database response for a category
#[derive(Debug, Clone, FromRow)]
pub struct CategoryDBResponse {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<CategoryId>,
}
