//! Database models for the help knowledge base.

use crate::api::models::help::{HelpArticleCreate, HelpArticleUpdate, HelpCategoryCreate, HelpCategoryUpdate};
use crate::types::{HelpArticleId, HelpCategoryId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a help category
#[derive(Debug, Clone)]
pub struct HelpCategoryCreateDBRequest {
    pub name: String,
    pub slug: String,
}

impl From<HelpCategoryCreate> for HelpCategoryCreateDBRequest {
    fn from(api: HelpCategoryCreate) -> Self {
        Self {
            name: api.name,
            slug: api.slug,
        }
    }
}

/// Database request for updating a help category. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct HelpCategoryUpdateDBRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl From<HelpCategoryUpdate> for HelpCategoryUpdateDBRequest {
    fn from(api: HelpCategoryUpdate) -> Self {
        Self {
            name: api.name,
            slug: api.slug,
        }
    }
}

/// Database response for a help category
#[derive(Debug, Clone, FromRow)]
pub struct HelpCategoryDBResponse {
    pub id: HelpCategoryId,
    pub name: String,
    pub slug: String,
}

/// Database request for creating a help article
#[derive(Debug, Clone)]
pub struct HelpArticleCreateDBRequest {
    pub category_id: HelpCategoryId,
    pub title: String,
    pub slug: String,
    pub content: String,
}

impl From<HelpArticleCreate> for HelpArticleCreateDBRequest {
    fn from(api: HelpArticleCreate) -> Self {
        Self {
            category_id: api.category_id,
            title: api.title,
            slug: api.slug,
            content: api.content,
        }
    }
}

/// Database request for updating a help article. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct HelpArticleUpdateDBRequest {
    pub category_id: Option<HelpCategoryId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
}

impl From<HelpArticleUpdate> for HelpArticleUpdateDBRequest {
    fn from(api: HelpArticleUpdate) -> Self {
        Self {
            category_id: api.category_id,
            title: api.title,
            slug: api.slug,
            content: api.content,
        }
    }
}

/// Database response for a help article
#[derive(Debug, Clone, FromRow)]
pub struct HelpArticleDBResponse {
    pub id: HelpArticleId,
    pub category_id: HelpCategoryId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
