//! Database repository for the product category tree.
//!
//! Categories are a self-referencing hierarchy. Acyclicity is an invariant of
//! the table, enforced here at write time: a parent assignment whose ancestor
//! chain would contain the category itself is rejected with
//! [`DbError::CircularReference`]. Read-side traversal therefore never has to
//! guard against cycles.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::categories::{CategoryCreateDBRequest, CategoryDBResponse, CategoryUpdateDBRequest},
};
use crate::types::{CategoryId, abbrev_uuid, slugify};
use sqlx::PgConnection;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing categories
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    pub skip: i64,
    pub limit: i64,
}

impl CategoryFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

pub struct Categories<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Categories<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// The root-to-self chain of categories, self included.
    ///
    /// Returns an empty vector for an unknown id. The depth cap bounds the
    /// recursion on data predating the write-time cycle check.
    #[instrument(skip(self), fields(category_id = %abbrev_uuid(&id)), err)]
    pub async fn path(&mut self, id: CategoryId) -> Result<Vec<CategoryDBResponse>> {
        let chain = sqlx::query_as::<_, CategoryDBResponse>(
            "WITH RECURSIVE chain AS (
                SELECT id, name, slug, parent_id, 1 AS depth
                FROM categories WHERE id = $1
                UNION ALL
                SELECT c.id, c.name, c.slug, c.parent_id, chain.depth + 1
                FROM categories c
                JOIN chain ON c.id = chain.parent_id
                WHERE chain.depth < 64
            )
            SELECT id, name, slug, parent_id FROM chain ORDER BY depth DESC",
        )
        .bind(id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(chain)
    }

    /// The slash-joined slug path from root ancestor to this category.
    pub async fn full_slug(&mut self, id: CategoryId) -> Result<Option<String>> {
        let chain = self.path(id).await?;
        if chain.is_empty() {
            return Ok(None);
        }
        Ok(Some(chain.iter().map(|c| c.slug.as_str()).collect::<Vec<_>>().join("/")))
    }

    /// Reject a parent assignment that would make `id` its own ancestor.
    async fn ensure_acyclic(&mut self, id: CategoryId, new_parent: CategoryId) -> Result<()> {
        if id == new_parent {
            return Err(DbError::CircularReference {
                entity_type: "category".to_string(),
                id: id.to_string(),
            });
        }

        let ancestors: Vec<CategoryId> = sqlx::query_scalar(
            "WITH RECURSIVE chain AS (
                SELECT id, parent_id, 1 AS depth
                FROM categories WHERE id = $1
                UNION ALL
                SELECT c.id, c.parent_id, chain.depth + 1
                FROM categories c
                JOIN chain ON c.id = chain.parent_id
                WHERE chain.depth < 64
            )
            SELECT id FROM chain",
        )
        .bind(new_parent)
        .fetch_all(&mut *self.db)
        .await?;

        if ancestors.contains(&id) {
            return Err(DbError::CircularReference {
                entity_type: "category".to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Categories<'c> {
    type CreateRequest = CategoryCreateDBRequest;
    type UpdateRequest = CategoryUpdateDBRequest;
    type Response = CategoryDBResponse;
    type Id = CategoryId;
    type Filter = CategoryFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let slug = match &request.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => slugify(&request.name),
        };

        let category = sqlx::query_as::<_, CategoryDBResponse>(
            "INSERT INTO categories (id, name, slug, parent_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, slug, parent_id",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&slug)
        .bind(request.parent_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(category)
    }

    #[instrument(skip(self), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let category = sqlx::query_as::<_, CategoryDBResponse>("SELECT id, name, slug, parent_id FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(category)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<Self::Id>) -> Result<HashMap<Self::Id, Self::Response>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let categories = sqlx::query_as::<_, CategoryDBResponse>("SELECT id, name, slug, parent_id FROM categories WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(categories.into_iter().map(|category| (category.id, category)).collect())
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let categories = sqlx::query_as::<_, CategoryDBResponse>(
            "SELECT id, name, slug, parent_id FROM categories ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(categories)
    }

    #[instrument(skip(self), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        // Subtree and owned products go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        if let Some(Some(new_parent)) = request.parent_id {
            self.ensure_acyclic(id, new_parent).await?;
        }

        // Explicit slug wins; an explicitly emptied slug re-derives from the new name
        let slug = match &request.slug {
            Some(slug) if !slug.is_empty() => Some(slug.clone()),
            Some(_) => request.name.as_deref().map(slugify),
            None => None,
        };

        let category = sqlx::query_as::<_, CategoryDBResponse>(
            "UPDATE categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                parent_id = CASE WHEN $4 THEN $5 ELSE parent_id END
             WHERE id = $1
             RETURNING id, name, slug, parent_id",
        )
        .bind(id)
        .bind(&request.name)
        .bind(&slug)
        .bind(request.parent_id.is_some())
        .bind(request.parent_id.flatten())
        .fetch_optional(&mut *self.db)
        .await?;

        category.ok_or(DbError::NotFound)
    }
}
