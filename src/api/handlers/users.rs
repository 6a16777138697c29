//! Handlers for user account CRUD.

use crate::api::models::users::{ListUsersQuery, UserCreate, UserResponse, UserUpdate};
use crate::db::handlers::users::UserFilter;
use crate::db::handlers::{Repository, Users};
use crate::db::models::users::{UserCreateDBRequest, UserUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::UserId;
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    summary = "List users",
    params(ListUsersQuery),
    responses((status = 200, description = "Users, newest first", body = Vec<UserResponse>))
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>, Query(query): Query<ListUsersQuery>) -> Result<Json<Vec<UserResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let users = repo.list(&UserFilter::new(skip, limit)).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/users/",
    tag = "users",
    summary = "Create user",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "Email already in use"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_user(State(state): State<AppState>, Json(create): Json<UserCreate>) -> Result<(StatusCode, Json<UserResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let user = repo.create(&UserCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/users/{id}/",
    tag = "users",
    summary = "Get user",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "User not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<Json<UserResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(user) => Ok(Json(UserResponse::from(user))),
        None => Err(Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/users/{id}/",
    tag = "users",
    summary = "Update user",
    request_body = UserUpdate,
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "User not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    match repo.update(id, &UserUpdateDBRequest::from(update)).await {
        Ok(user) => Ok(Json(UserResponse::from(user))),
        Err(crate::db::errors::DbError::NotFound) => Err(Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/users/{id}/",
    tag = "users",
    summary = "Delete user",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted; their products keep existing with no creator"),
        (status = 404, description = "User not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
