//! Database repository for help categories.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::help::{HelpCategoryCreateDBRequest, HelpCategoryDBResponse, HelpCategoryUpdateDBRequest},
};
use crate::types::{HelpCategoryId, abbrev_uuid};
use sqlx::PgConnection;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing help categories
#[derive(Debug, Clone)]
pub struct HelpCategoryFilter {
    pub skip: i64,
    pub limit: i64,
}

impl HelpCategoryFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

pub struct HelpCategories<'c> {
    db: &'c mut PgConnection,
}

impl<'c> HelpCategories<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for HelpCategories<'c> {
    type CreateRequest = HelpCategoryCreateDBRequest;
    type UpdateRequest = HelpCategoryUpdateDBRequest;
    type Response = HelpCategoryDBResponse;
    type Id = HelpCategoryId;
    type Filter = HelpCategoryFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let category = sqlx::query_as::<_, HelpCategoryDBResponse>(
            "INSERT INTO help_categories (id, name, slug) VALUES ($1, $2, $3)
             RETURNING id, name, slug",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.slug)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(category)
    }

    #[instrument(skip(self), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let category = sqlx::query_as::<_, HelpCategoryDBResponse>("SELECT id, name, slug FROM help_categories WHERE id = $1")
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

        let categories = sqlx::query_as::<_, HelpCategoryDBResponse>("SELECT id, name, slug FROM help_categories WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(categories.into_iter().map(|category| (category.id, category)).collect())
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let categories = sqlx::query_as::<_, HelpCategoryDBResponse>(
            "SELECT id, name, slug FROM help_categories ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(categories)
    }

    #[instrument(skip(self), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        // Owned articles go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM help_categories WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let category = sqlx::query_as::<_, HelpCategoryDBResponse>(
            "UPDATE help_categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug)
             WHERE id = $1
             RETURNING id, name, slug",
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.slug)
        .fetch_optional(&mut *self.db)
        .await?;

        category.ok_or(DbError::NotFound)
    }
}
