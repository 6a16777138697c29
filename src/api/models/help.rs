//! API request/response models for the help knowledge base.

use super::pagination::Pagination;
use crate::db::models::help::{HelpArticleDBResponse, HelpCategoryDBResponse};
use crate::types::{HelpArticleId, HelpCategoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HelpCategoryCreate {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HelpCategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HelpCategoryResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: HelpCategoryId,
    pub name: String,
    pub slug: String,
}

impl From<HelpCategoryDBResponse> for HelpCategoryResponse {
    fn from(db: HelpCategoryDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            slug: db.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HelpArticleCreate {
    #[schema(value_type = String, format = "uuid")]
    pub category_id: HelpCategoryId,
    pub title: String,
    pub slug: String,
    /// Markdown supported
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HelpArticleUpdate {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub category_id: Option<HelpCategoryId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HelpArticleResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: HelpArticleId,
    #[schema(value_type = String, format = "uuid")]
    pub category_id: HelpCategoryId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HelpArticleDBResponse> for HelpArticleResponse {
    fn from(db: HelpArticleDBResponse) -> Self {
        Self {
            id: db.id,
            category_id: db.category_id,
            title: db.title,
            slug: db.slug,
            content: db.content,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Query parameters for the public help listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListHelpQuery {
    /// Case-insensitive substring match against article titles
    pub search: Option<String>,
}

/// Query parameters for listing help categories
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListHelpCategoriesQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}
