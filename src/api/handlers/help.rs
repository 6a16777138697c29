//! Handlers for the help knowledge base: the public listing/detail routes and
//! resource CRUD for categories and articles.

use crate::api::models::help::{
    HelpArticleCreate, HelpArticleResponse, HelpArticleUpdate, HelpCategoryCreate, HelpCategoryResponse, HelpCategoryUpdate,
    ListHelpCategoriesQuery, ListHelpQuery,
};
use crate::db::handlers::help_articles::HelpArticleFilter;
use crate::db::handlers::help_categories::HelpCategoryFilter;
use crate::db::handlers::{HelpArticles, HelpCategories, Repository};
use crate::db::models::help::{
    HelpArticleCreateDBRequest, HelpArticleUpdateDBRequest, HelpCategoryCreateDBRequest, HelpCategoryUpdateDBRequest,
};
use crate::errors::{Error, Result};
use crate::types::HelpCategoryId;
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/help/",
    tag = "help",
    summary = "List help articles",
    params(ListHelpQuery),
    responses(
        (status = 200, description = "All help articles, optionally filtered by title substring; always an array", body = Vec<HelpArticleResponse>),
    )
)]
#[tracing::instrument(skip_all, fields(search = query.search.as_deref().unwrap_or("-")))]
pub async fn list_help(State(state): State<AppState>, Query(query): Query<ListHelpQuery>) -> Result<Json<Vec<HelpArticleResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpArticles::new(&mut conn);

    let search = query.search.map(|term| term.trim().to_string()).filter(|term| !term.is_empty());
    let articles = repo.list(&HelpArticleFilter { search }).await?;

    Ok(Json(articles.into_iter().map(HelpArticleResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/help/{slug}/",
    tag = "help",
    summary = "Get help article by slug",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "The article", body = HelpArticleResponse),
        (status = 404, description = "Article not found"),
    )
)]
#[tracing::instrument(skip_all, fields(slug = %slug))]
pub async fn get_help_article_by_slug(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<HelpArticleResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpArticles::new(&mut conn);

    match repo.get_by_slug(&slug).await? {
        Some(article) => Ok(Json(HelpArticleResponse::from(article))),
        None => {
            tracing::warn!(%slug, "help article not found");
            Err(Error::ArticleNotFound)
        }
    }
}

// --- Help category CRUD ---

#[utoipa::path(
    get,
    path = "/help/categories/",
    tag = "help",
    summary = "List help categories",
    params(ListHelpCategoriesQuery),
    responses((status = 200, description = "Help categories", body = Vec<HelpCategoryResponse>))
)]
#[tracing::instrument(skip_all)]
pub async fn list_help_categories(
    State(state): State<AppState>,
    Query(query): Query<ListHelpCategoriesQuery>,
) -> Result<Json<Vec<HelpCategoryResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpCategories::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let categories = repo.list(&HelpCategoryFilter::new(skip, limit)).await?;

    Ok(Json(categories.into_iter().map(HelpCategoryResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/help/categories/",
    tag = "help",
    summary = "Create help category",
    request_body = HelpCategoryCreate,
    responses(
        (status = 201, description = "Help category created", body = HelpCategoryResponse),
        (status = 409, description = "Name or slug already in use"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_help_category(
    State(state): State<AppState>,
    Json(create): Json<HelpCategoryCreate>,
) -> Result<(StatusCode, Json<HelpCategoryResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpCategories::new(&mut conn);

    let category = repo.create(&HelpCategoryCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(HelpCategoryResponse::from(category))))
}

#[utoipa::path(
    get,
    path = "/help/categories/{id}/",
    tag = "help",
    summary = "Get help category",
    params(("id" = String, Path, description = "Help category ID")),
    responses(
        (status = 200, description = "The help category", body = HelpCategoryResponse),
        (status = 404, description = "Help category not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_help_category(State(state): State<AppState>, Path(id): Path<HelpCategoryId>) -> Result<Json<HelpCategoryResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpCategories::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(category) => Ok(Json(HelpCategoryResponse::from(category))),
        None => Err(Error::NotFound {
            resource: "Help category".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/help/categories/{id}/",
    tag = "help",
    summary = "Update help category",
    request_body = HelpCategoryUpdate,
    params(("id" = String, Path, description = "Help category ID")),
    responses(
        (status = 200, description = "Updated help category", body = HelpCategoryResponse),
        (status = 404, description = "Help category not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_help_category(
    State(state): State<AppState>,
    Path(id): Path<HelpCategoryId>,
    Json(update): Json<HelpCategoryUpdate>,
) -> Result<Json<HelpCategoryResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpCategories::new(&mut conn);

    match repo.update(id, &HelpCategoryUpdateDBRequest::from(update)).await {
        Ok(category) => Ok(Json(HelpCategoryResponse::from(category))),
        Err(crate::db::errors::DbError::NotFound) => Err(Error::NotFound {
            resource: "Help category".to_string(),
            id: id.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/help/categories/{id}/",
    tag = "help",
    summary = "Delete help category",
    params(("id" = String, Path, description = "Help category ID")),
    responses(
        (status = 204, description = "Help category deleted (articles cascade)"),
        (status = 404, description = "Help category not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_help_category(State(state): State<AppState>, Path(id): Path<HelpCategoryId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpCategories::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::NotFound {
            resource: "Help category".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

// --- Help article CRUD (addressed by slug, like the public detail route) ---

#[utoipa::path(
    get,
    path = "/help/articles/",
    tag = "help",
    summary = "List help articles (resource collection)",
    responses((status = 200, description = "All help articles", body = Vec<HelpArticleResponse>))
)]
#[tracing::instrument(skip_all)]
pub async fn list_help_articles(State(state): State<AppState>) -> Result<Json<Vec<HelpArticleResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpArticles::new(&mut conn);

    let articles = repo.list(&HelpArticleFilter::default()).await?;
    Ok(Json(articles.into_iter().map(HelpArticleResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/help/articles/",
    tag = "help",
    summary = "Create help article",
    request_body = HelpArticleCreate,
    responses(
        (status = 201, description = "Help article created", body = HelpArticleResponse),
        (status = 400, description = "Unknown help category"),
        (status = 409, description = "Slug already in use"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_help_article(
    State(state): State<AppState>,
    Json(create): Json<HelpArticleCreate>,
) -> Result<(StatusCode, Json<HelpArticleResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpArticles::new(&mut conn);

    let article = repo.create(&HelpArticleCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(HelpArticleResponse::from(article))))
}

#[utoipa::path(
    get,
    path = "/help/articles/{slug}/",
    tag = "help",
    summary = "Get help article (resource collection)",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "The article", body = HelpArticleResponse),
        (status = 404, description = "Article not found"),
    )
)]
#[tracing::instrument(skip_all, fields(slug = %slug))]
pub async fn get_help_article(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<HelpArticleResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpArticles::new(&mut conn);

    match repo.get_by_slug(&slug).await? {
        Some(article) => Ok(Json(HelpArticleResponse::from(article))),
        None => Err(Error::NotFound {
            resource: "Help article".to_string(),
            id: slug,
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/help/articles/{slug}/",
    tag = "help",
    summary = "Update help article",
    request_body = HelpArticleUpdate,
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Updated article", body = HelpArticleResponse),
        (status = 404, description = "Article not found"),
    )
)]
#[tracing::instrument(skip_all, fields(slug = %slug))]
pub async fn update_help_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(update): Json<HelpArticleUpdate>,
) -> Result<Json<HelpArticleResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpArticles::new(&mut conn);

    let Some(article) = repo.get_by_slug(&slug).await? else {
        return Err(Error::NotFound {
            resource: "Help article".to_string(),
            id: slug,
        });
    };

    let updated = repo.update(article.id, &HelpArticleUpdateDBRequest::from(update)).await?;
    Ok(Json(HelpArticleResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/help/articles/{slug}/",
    tag = "help",
    summary = "Delete help article",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 404, description = "Article not found"),
    )
)]
#[tracing::instrument(skip_all, fields(slug = %slug))]
pub async fn delete_help_article(State(state): State<AppState>, Path(slug): Path<String>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = HelpArticles::new(&mut conn);

    let Some(article) = repo.get_by_slug(&slug).await? else {
        return Err(Error::NotFound {
            resource: "Help article".to_string(),
            id: slug,
        });
    };

    repo.delete(article.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
