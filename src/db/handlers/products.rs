//! Database repository for products.

use crate::config::SeoLookupMode;
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::products::{ProductCreateDBRequest, ProductDBResponse, ProductUpdateDBRequest},
};
use crate::types::{ProductId, abbrev_uuid, slugify};
use sqlx::PgConnection;
use sqlx::types::Json;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, title, description, slug, category_id, price, images, created_by, created_at, updated_at";

/// Filter for listing products.
///
/// `country` restricts results to products whose creator's country matches
/// case-insensitively; `limit: None` returns every match.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub country: Option<String>,
    pub skip: i64,
    pub limit: Option<i64>,
}

impl ProductFilter {
    pub fn page(skip: i64, limit: i64) -> Self {
        Self {
            country: None,
            skip,
            limit: Some(limit),
        }
    }

    pub fn by_country(country: &str) -> Self {
        Self {
            country: Some(country.to_string()),
            skip: 0,
            limit: None,
        }
    }
}

pub struct Products<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Products<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up a product by its SEO path parts: product slug, creator country
    /// (case-insensitive), and immediate category slug.
    ///
    /// In [`SeoLookupMode::Strict`] a category slug that matches several
    /// distinct categories with qualifying products is treated as no match.
    #[instrument(skip(self), err)]
    pub async fn find_by_seo_path(
        &mut self,
        slug: &str,
        country: &str,
        category_slug: &str,
        mode: SeoLookupMode,
    ) -> Result<Option<ProductDBResponse>> {
        let matches = sqlx::query_as::<_, ProductDBResponse>(
            "SELECT p.id, p.title, p.description, p.slug, p.category_id, p.price,
                    p.images, p.created_by, p.created_at, p.updated_at
             FROM products p
             JOIN users u ON u.id = p.created_by
             JOIN categories c ON c.id = p.category_id
             WHERE p.slug = $1 AND LOWER(u.country) = LOWER($2) AND c.slug = $3
             ORDER BY p.created_at",
        )
        .bind(slug)
        .bind(country)
        .bind(category_slug)
        .fetch_all(&mut *self.db)
        .await?;

        if mode == SeoLookupMode::Strict {
            let category_ids: std::collections::HashSet<_> = matches.iter().map(|p| p.category_id).collect();
            if category_ids.len() > 1 {
                return Ok(None);
            }
        }

        Ok(matches.into_iter().next())
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Products<'c> {
    type CreateRequest = ProductCreateDBRequest;
    type UpdateRequest = ProductUpdateDBRequest;
    type Response = ProductDBResponse;
    type Id = ProductId;
    type Filter = ProductFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let slug = match &request.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => slugify(&request.title),
        };

        let product = sqlx::query_as::<_, ProductDBResponse>(&format!(
            "INSERT INTO products (id, title, description, slug, category_id, price, images, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&request.title)
        .bind(&request.description)
        .bind(&slug)
        .bind(request.category_id)
        .bind(request.price)
        .bind(Json(&request.images))
        .bind(request.created_by)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let product = sqlx::query_as::<_, ProductDBResponse>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(product)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<Self::Id>) -> Result<HashMap<Self::Id, Self::Response>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let products = sqlx::query_as::<_, ProductDBResponse>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"))
            .bind(&ids)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(products.into_iter().map(|product| (product.id, product)).collect())
    }

    #[instrument(skip(self, filter), fields(country = filter.country.as_deref().unwrap_or("-")), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let products = match &filter.country {
            Some(country) => {
                sqlx::query_as::<_, ProductDBResponse>(
                    "SELECT p.id, p.title, p.description, p.slug, p.category_id, p.price,
                            p.images, p.created_by, p.created_at, p.updated_at
                     FROM products p
                     JOIN users u ON u.id = p.created_by
                     WHERE LOWER(u.country) = LOWER($1)
                     ORDER BY p.created_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(country)
                .bind(filter.limit)
                .bind(filter.skip)
                .fetch_all(&mut *self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductDBResponse>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(filter.limit)
                .bind(filter.skip)
                .fetch_all(&mut *self.db)
                .await?
            }
        };

        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Explicit slug wins; an explicitly emptied slug re-derives from the new title
        let slug = match &request.slug {
            Some(slug) if !slug.is_empty() => Some(slug.clone()),
            Some(_) => request.title.as_deref().map(slugify),
            None => None,
        };

        let product = sqlx::query_as::<_, ProductDBResponse>(&format!(
            "UPDATE products SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                slug = COALESCE($4, slug),
                category_id = COALESCE($5, category_id),
                price = COALESCE($6, price),
                images = COALESCE($7, images),
                created_by = CASE WHEN $8 THEN $9 ELSE created_by END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&slug)
        .bind(request.category_id)
        .bind(request.price)
        .bind(request.images.as_ref().map(Json))
        .bind(request.created_by.is_some())
        .bind(request.created_by.flatten())
        .fetch_optional(&mut *self.db)
        .await?;

        product.ok_or(DbError::NotFound)
    }
}
