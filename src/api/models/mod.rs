//! API request/response models.
//!
//! These are the versioned wire shapes the HTTP layer speaks. Each resource
//! module pairs create/update request types with a response type and explicit
//! conversions from the database models in [`crate::db::models`], so schema
//! changes never silently change the wire contract.

pub mod categories;
pub mod help;
pub mod pagination;
pub mod products;
pub mod users;
