//! HTTP API layer.
//!
//! Split into [`handlers`] (axum route functions) and [`models`] (the
//! versioned request/response shapes they speak). Routing lives in
//! [`crate::build_router`].

pub mod handlers;
pub mod models;
