//! API request/response models for products.
//!
//! [`ProductResponse`] is the versioned wire shape for a product. It is built
//! from the storage row plus its resolved relations (creator, category chain)
//! so the serialized contract never silently tracks schema changes.

use super::pagination::Pagination;
use crate::db::models::categories::CategoryDBResponse;
use crate::db::models::products::ProductDBResponse;
use crate::db::models::users::UserDBResponse;
use crate::types::{CategoryId, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Country code used in SEO URLs for products without a creator country.
const GLOBAL_COUNTRY: &str = "global";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductCreate {
    pub title: String,
    pub description: String,
    /// Derived from the title when omitted or empty
    pub slug: Option<String>,
    #[schema(value_type = String, format = "uuid")]
    pub category_id: CategoryId,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub images: Option<Vec<String>>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub created_by: Option<UserId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Send an empty string to re-derive the slug from the (new) title
    pub slug: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub category_id: Option<CategoryId>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub images: Option<Vec<String>>,
    /// Omit to leave unchanged; send `null` to clear the creator
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub created_by: Option<Option<UserId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ProductId,
    pub title: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Full category hierarchy as `"Root > ... > Leaf"`, or `"Uncategorized"`
    pub category_path: String,
    /// SEO-friendly URL: `/{country}/{category-path}/{slug}`
    pub product_url: String,
    /// Creator's display name, or `"Unknown"`
    pub created_by_name: String,
    /// Creator's country lowercased, or `"unknown"`
    pub created_by_country: String,
}

impl ProductResponse {
    /// Assemble the wire shape from a product row and its resolved relations.
    ///
    /// `category_chain` is the root-to-leaf chain of the product's category
    /// (empty when the category is missing).
    pub fn build(db: ProductDBResponse, creator: Option<&UserDBResponse>, category_chain: &[CategoryDBResponse]) -> Self {
        let creator_country = creator
            .and_then(|user| user.country.as_deref())
            .map(|country| country.trim().to_lowercase())
            .filter(|country| !country.is_empty());

        let url_country = creator_country.clone().unwrap_or_else(|| GLOBAL_COUNTRY.to_string());

        let category_path = if category_chain.is_empty() {
            "Uncategorized".to_string()
        } else {
            category_chain.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(" > ")
        };

        let full_slug = if category_chain.is_empty() {
            "uncategorized".to_string()
        } else {
            category_chain.iter().map(|c| c.slug.as_str()).collect::<Vec<_>>().join("/")
        };

        let product_url = format!("/{url_country}/{full_slug}/{}", db.slug);

        Self {
            id: db.id,
            title: db.title,
            description: db.description,
            price: db.price,
            images: db.images.0,
            created_at: db.created_at,
            updated_at: db.updated_at,
            category_path,
            product_url,
            created_by_name: creator.map(|user| user.name.clone()).unwrap_or_else(|| "Unknown".to_string()),
            created_by_country: creator_country.unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// Query parameters for listing products
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListProductsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

/// Explicit country override, honored wherever country detection runs
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CountryQuery {
    /// ISO country code; takes precedence over address-based detection
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn product_row(slug: &str, created_by: Option<UserId>, category_id: CategoryId) -> ProductDBResponse {
        let now = Utc::now();
        ProductDBResponse {
            id: Uuid::new_v4(),
            title: "X".to_string(),
            description: "A product".to_string(),
            slug: slug.to_string(),
            category_id,
            price: Decimal::new(129_999, 2),
            images: Json(vec!["https://img.example/x.jpg".to_string()]),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    fn user_row(name: &str, country: Option<&str>) -> UserDBResponse {
        let now = Utc::now();
        UserDBResponse {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.to_string(),
            country: country.map(|c| c.to_string()),
            is_active: true,
            is_staff: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn category_row(name: &str, slug: &str, parent_id: Option<CategoryId>) -> CategoryDBResponse {
        CategoryDBResponse {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            parent_id,
        }
    }

    #[test]
    fn test_seo_url_uses_full_category_path() {
        let root = category_row("Electronics", "electronics", None);
        let child = category_row("Phones", "phones", Some(root.id));
        let creator = user_row("Ama", Some("GH"));
        let chain = vec![root, child.clone()];

        let response = ProductResponse::build(product_row("x", Some(creator.id), child.id), Some(&creator), &chain);

        assert_eq!(response.product_url, "/gh/electronics/phones/x");
        assert_eq!(response.category_path, "Electronics > Phones");
        assert_eq!(response.created_by_name, "Ama");
        assert_eq!(response.created_by_country, "gh");
    }

    #[test]
    fn test_root_category_path_is_single_segment() {
        let root = category_row("Electronics", "electronics", None);
        let creator = user_row("Ama", Some("NG"));
        let chain = vec![root.clone()];

        let response = ProductResponse::build(product_row("x", Some(creator.id), root.id), Some(&creator), &chain);

        assert_eq!(response.product_url, "/ng/electronics/x");
        assert_eq!(response.category_path, "Electronics");
    }

    #[test]
    fn test_missing_creator_is_global_and_unknown() {
        let root = category_row("Electronics", "electronics", None);
        let chain = vec![root.clone()];

        let response = ProductResponse::build(product_row("x", None, root.id), None, &chain);

        assert_eq!(response.product_url, "/global/electronics/x");
        assert_eq!(response.created_by_name, "Unknown");
        assert_eq!(response.created_by_country, "unknown");
    }

    #[test]
    fn test_creator_without_country() {
        let root = category_row("Electronics", "electronics", None);
        let creator = user_row("Kofi", None);
        let chain = vec![root.clone()];

        let response = ProductResponse::build(product_row("x", Some(creator.id), root.id), Some(&creator), &chain);

        assert_eq!(response.product_url, "/global/electronics/x");
        assert_eq!(response.created_by_name, "Kofi");
        assert_eq!(response.created_by_country, "unknown");
    }

    #[test]
    fn test_missing_category_chain_is_uncategorized() {
        let response = ProductResponse::build(product_row("x", None, Uuid::new_v4()), None, &[]);

        assert_eq!(response.category_path, "Uncategorized");
        assert_eq!(response.product_url, "/global/uncategorized/x");
    }
}
