//! Database models for products.

use crate::api::models::products::{ProductCreate, ProductUpdate};
use crate::types::{CategoryId, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::types::Json;

/// Database request for creating a product.
///
/// A missing slug is derived from the title by the repository.
#[derive(Debug, Clone)]
pub struct ProductCreateDBRequest {
    pub title: String,
    pub description: String,
    pub slug: Option<String>,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub images: Vec<String>,
    pub created_by: Option<UserId>,
}

impl From<ProductCreate> for ProductCreateDBRequest {
    fn from(api: ProductCreate) -> Self {
        Self {
            title: api.title,
            description: api.description,
            slug: api.slug,
            category_id: api.category_id,
            price: api.price,
            images: api.images.unwrap_or_default(),
            created_by: api.created_by,
        }
    }
}

/// Database request for updating a product. `None` fields are left unchanged;
/// `created_by` distinguishes "unchanged" from "clear the creator".
#[derive(Debug, Clone, Default)]
pub struct ProductUpdateDBRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub category_id: Option<CategoryId>,
    pub price: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub created_by: Option<Option<UserId>>,
}

impl From<ProductUpdate> for ProductUpdateDBRequest {
    fn from(api: ProductUpdate) -> Self {
        Self {
            title: api.title,
            description: api.description,
            slug: api.slug,
            category_id: api.category_id,
            price: api.price,
            images: api.images,
            created_by: api.created_by,
        }
    }
}

/// Database response for a product
#[derive(Debug, Clone, FromRow)]
pub struct ProductDBResponse {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub images: Json<Vec<String>>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
