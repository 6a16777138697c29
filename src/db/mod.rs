//! Database layer: error taxonomy, repositories, and storage models.
//!
//! All persistence goes through PostgreSQL via sqlx. The layer is split the
//! same way as the API layer: [`models`] holds the typed requests/responses the
//! repositories speak, [`handlers`] holds the repositories themselves, and
//! [`errors`] classifies constraint failures so the API layer can map them to
//! status codes without string-matching database messages.

pub mod errors;
pub mod handlers;
pub mod models;
