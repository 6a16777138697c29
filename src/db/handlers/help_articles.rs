//! Database repository for help articles.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::help::{HelpArticleCreateDBRequest, HelpArticleDBResponse, HelpArticleUpdateDBRequest},
};
use crate::types::{HelpArticleId, abbrev_uuid};
use sqlx::PgConnection;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

const ARTICLE_COLUMNS: &str = "id, category_id, title, slug, content, created_at, updated_at";

/// Filter for listing help articles.
///
/// `search` is a case-insensitive substring match against the title.
#[derive(Debug, Clone, Default)]
pub struct HelpArticleFilter {
    pub search: Option<String>,
}

impl HelpArticleFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }
}

pub struct HelpArticles<'c> {
    db: &'c mut PgConnection,
}

impl<'c> HelpArticles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up an article by its unique slug.
    #[instrument(skip(self), err)]
    pub async fn get_by_slug(&mut self, slug: &str) -> Result<Option<HelpArticleDBResponse>> {
        let article = sqlx::query_as::<_, HelpArticleDBResponse>(&format!("SELECT {ARTICLE_COLUMNS} FROM help_articles WHERE slug = $1"))
            .bind(slug)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(article)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for HelpArticles<'c> {
    type CreateRequest = HelpArticleCreateDBRequest;
    type UpdateRequest = HelpArticleUpdateDBRequest;
    type Response = HelpArticleDBResponse;
    type Id = HelpArticleId;
    type Filter = HelpArticleFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let article = sqlx::query_as::<_, HelpArticleDBResponse>(&format!(
            "INSERT INTO help_articles (id, category_id, title, slug, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(request.category_id)
        .bind(&request.title)
        .bind(&request.slug)
        .bind(&request.content)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(article)
    }

    #[instrument(skip(self), fields(article_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let article = sqlx::query_as::<_, HelpArticleDBResponse>(&format!("SELECT {ARTICLE_COLUMNS} FROM help_articles WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(article)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<Self::Id>) -> Result<HashMap<Self::Id, Self::Response>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let articles = sqlx::query_as::<_, HelpArticleDBResponse>(&format!("SELECT {ARTICLE_COLUMNS} FROM help_articles WHERE id = ANY($1)"))
            .bind(&ids)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(articles.into_iter().map(|article| (article.id, article)).collect())
    }

    /// List all articles, optionally narrowed by a title substring.
    /// Always returns every match; the help listing has no pagination.
    #[instrument(skip(self, filter), fields(search = filter.search.as_deref().unwrap_or("-")), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let articles = sqlx::query_as::<_, HelpArticleDBResponse>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM help_articles
             WHERE $1::text IS NULL OR title ILIKE '%' || $1 || '%'
             ORDER BY created_at"
        ))
        .bind(&filter.search)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(articles)
    }

    #[instrument(skip(self), fields(article_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM help_articles WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(article_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let article = sqlx::query_as::<_, HelpArticleDBResponse>(&format!(
            "UPDATE help_articles SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                slug = COALESCE($4, slug),
                content = COALESCE($5, content),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(id)
        .bind(request.category_id)
        .bind(&request.title)
        .bind(&request.slug)
        .bind(&request.content)
        .fetch_optional(&mut *self.db)
        .await?;

        article.ok_or(DbError::NotFound)
    }
}
