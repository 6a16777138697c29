//! Database models for user accounts.

use crate::api::models::users::{UserCreate, UserUpdate};
use crate::types::UserId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub email: String,
    pub name: String,
    pub country: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
}

impl From<UserCreate> for UserCreateDBRequest {
    fn from(api: UserCreate) -> Self {
        Self {
            email: api.email,
            name: api.name,
            country: api.country,
            is_active: api.is_active.unwrap_or(true),
            is_staff: api.is_staff.unwrap_or(false),
        }
    }
}

/// Database request for updating a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub name: Option<String>,
    pub country: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

impl From<UserUpdate> for UserUpdateDBRequest {
    fn from(api: UserUpdate) -> Self {
        Self {
            name: api.name,
            country: api.country,
            is_active: api.is_active,
            is_staff: api.is_staff,
        }
    }
}

/// Database response for a user
#[derive(Debug, Clone, FromRow)]
pub struct UserDBResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub country: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
