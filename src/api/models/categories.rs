//! API request/response models for the product category tree.

use super::pagination::Pagination;
use crate::db::models::categories::CategoryDBResponse;
use crate::types::CategoryId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryCreate {
    pub name: String,
    /// Derived from the name when omitted or empty
    pub slug: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub parent_id: Option<CategoryId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    /// Send an empty string to re-derive the slug from the (new) name
    pub slug: Option<String>,
    /// Omit to leave unchanged; send `null` to detach from the parent.
    /// A parent whose ancestor chain contains this category is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub parent_id: Option<Option<CategoryId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub parent_id: Option<CategoryId>,
    /// Slash-joined slug path from root ancestor to this category
    /// (only included on detail responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_slug: Option<String>,
}

impl From<CategoryDBResponse> for CategoryResponse {
    fn from(db: CategoryDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            slug: db.slug,
            parent_id: db.parent_id,
            full_slug: None, // By default, the computed path is not included
        }
    }
}

impl CategoryResponse {
    /// Create a response with the computed full slug included
    pub fn with_full_slug(mut self, full_slug: String) -> Self {
        self.full_slug = Some(full_slug);
        self
    }
}

/// Query parameters for listing categories
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListCategoriesQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}
