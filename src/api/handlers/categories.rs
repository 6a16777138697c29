//! Handlers for product category CRUD.
//!
//! Detail responses include the computed full slug path. Parent assignments
//! that would create a cycle are rejected by the repository with a 400.

use crate::api::models::categories::{CategoryCreate, CategoryResponse, CategoryUpdate, ListCategoriesQuery};
use crate::db::handlers::categories::CategoryFilter;
use crate::db::handlers::{Categories, Repository};
use crate::db::models::categories::{CategoryCreateDBRequest, CategoryUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::CategoryId;
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/categories/",
    tag = "categories",
    summary = "List categories",
    params(ListCategoriesQuery),
    responses((status = 200, description = "Categories ordered by name", body = Vec<CategoryResponse>))
)]
#[tracing::instrument(skip_all)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<Vec<CategoryResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let categories = repo.list(&CategoryFilter::new(skip, limit)).await?;

    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/categories/",
    tag = "categories",
    summary = "Create category",
    request_body = CategoryCreate,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Unknown parent category"),
        (status = 409, description = "Name or slug already in use"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(create): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    let category = repo.create(&CategoryCreateDBRequest::from(create)).await?;
    let full_slug = repo.full_slug(category.id).await?.unwrap_or_else(|| category.slug.clone());

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category).with_full_slug(full_slug))))
}

#[utoipa::path(
    get,
    path = "/categories/{id}/",
    tag = "categories",
    summary = "Get category",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "The category, with its full slug path", body = CategoryResponse),
        (status = 404, description = "Category not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_category(State(state): State<AppState>, Path(id): Path<CategoryId>) -> Result<Json<CategoryResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    let Some(category) = repo.get_by_id(id).await? else {
        return Err(Error::NotFound {
            resource: "Category".to_string(),
            id: id.to_string(),
        });
    };

    let full_slug = repo.full_slug(category.id).await?.unwrap_or_else(|| category.slug.clone());
    Ok(Json(CategoryResponse::from(category).with_full_slug(full_slug)))
}

#[utoipa::path(
    patch,
    path = "/categories/{id}/",
    tag = "categories",
    summary = "Update category",
    request_body = CategoryUpdate,
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Updated category", body = CategoryResponse),
        (status = 400, description = "Parent assignment would create a cycle"),
        (status = 404, description = "Category not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(update): Json<CategoryUpdate>,
) -> Result<Json<CategoryResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    let category = match repo.update(id, &CategoryUpdateDBRequest::from(update)).await {
        Ok(category) => category,
        Err(crate::db::errors::DbError::NotFound) => {
            return Err(Error::NotFound {
                resource: "Category".to_string(),
                id: id.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let full_slug = repo.full_slug(category.id).await?.unwrap_or_else(|| category.slug.clone());
    Ok(Json(CategoryResponse::from(category).with_full_slug(full_slug)))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}/",
    tag = "categories",
    summary = "Delete category",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted (subtree and products cascade)"),
        (status = 404, description = "Category not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_category(State(state): State<AppState>, Path(id): Path<CategoryId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::NotFound {
            resource: "Category".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
