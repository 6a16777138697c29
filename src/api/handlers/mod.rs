//! HTTP request handlers for all API endpoints.
//!
//! This module contains Axum route handlers organized by resource type.
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Business logic execution via database repositories
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`categories`]: Product category CRUD (tree-aware: full slug paths, cycle rejection)
//! - [`help`]: Help knowledge base - public listing/detail plus category and article CRUD
//! - [`products`]: Country-scoped discovery routes and product CRUD
//! - [`users`]: User account CRUD
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which automatically converts to
//! appropriate HTTP status codes and JSON error responses.

pub mod categories;
pub mod help;
pub mod products;
pub mod users;
