//! # storefront: country-aware marketplace catalog and help center API
//!
//! `storefront` is a REST backend exposing user accounts, a hierarchical
//! product catalog, and a help-article knowledge base, with country-based
//! product discovery. Products carry SEO-friendly URLs composed from the
//! creator's country, the category hierarchy, and the product slug.
//!
//! ## Overview
//!
//! The service is a straightforward data-management application: entities map
//! directly to database tables, response shapes are explicit DTOs per
//! resource, and the handlers perform filtered lookups with no business logic
//! beyond string formatting and tree traversal.
//!
//! A request's country is resolved from an explicit `?country=` override, the
//! client address (first `X-Forwarded-For` entry or the socket peer) combined
//! with an external geolocation lookup, or a configured default - in that
//! order, never failing. Product discovery routes filter the catalog by the
//! creator's country, matched case-insensitively.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL via sqlx for persistence.
//!
//! The **API layer** ([`api`]) exposes the public discovery routes
//! (`/{country}/products/`, `/{country}/{subcategory}/{slug}/`, `/help/`) and
//! plain REST collections for users, categories, products, help categories,
//! and help articles. Handlers speak the versioned wire shapes in
//! [`api::models`] and never serialize storage rows directly.
//!
//! The **database layer** ([`db`]) uses the repository pattern: each entity
//! has a repository wrapping a `PgConnection` that implements the crate's
//! [`db::handlers::Repository`] trait. The category tree is self-referencing;
//! acyclicity is enforced at write time so read-side traversal (recursive CTE)
//! needs no cycle guard.
//!
//! The **country resolver** ([`country`]) encapsulates the lookup order and
//! swallows geolocation failures, logging and defaulting instead.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use storefront::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = storefront::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     storefront::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires a PostgreSQL database and automatically runs
//! migrations on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! storefront::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod country;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test;

use crate::api::handlers::{categories, help, products, users};
use crate::country::CountryResolver;
use crate::openapi::ApiDoc;
use axum::http::{HeaderValue, Method, header};
use axum::{
    Json, Router,
    routing::get,
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{CategoryId, HelpArticleId, HelpCategoryId, ProductId, UserId};

/// Application state shared across all request handlers.
///
/// # Fields
///
/// - `db`: PostgreSQL connection pool
/// - `config`: Application configuration loaded from file/environment
/// - `country`: Country resolver (explicit override, client address lookup, default)
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub country: CountryResolver,
}

/// Get the storefront database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Build the CORS layer from configuration.
///
/// A wildcard origin serves `Access-Control-Allow-Origin: *` without
/// credentials; explicit origins honor the `allow_credentials` flag.
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors = &config.cors;

    let methods = [Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS];
    let mut layer = CorsLayer::new().allow_methods(methods).allow_headers([header::CONTENT_TYPE]);

    let wildcard = cors.allowed_origins.iter().any(|origin| matches!(origin, config::CorsOrigin::Wildcard));
    if wildcard {
        layer = layer.allow_origin(tower_http::cors::Any);
    } else {
        let origins = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin {
                config::CorsOrigin::Url(url) => Some(url.as_str().trim_end_matches('/').parse::<HeaderValue>()),
                config::CorsOrigin::Wildcard => None,
            })
            .collect::<Result<Vec<_>, _>>()?;
        layer = layer.allow_origin(origins).allow_credentials(cors.allow_credentials);
    }

    if let Some(max_age) = cors.max_age {
        layer = layer.max_age(Duration::from_secs(max_age));
    }

    Ok(layer)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router.
///
/// Paths are registered with trailing slashes, matching the public contract.
/// Static segments win over path parameters, so `/help/categories/` coexists
/// with `/help/{slug}/`, and `/users/` etc. coexist with the
/// `/{country}/...` discovery routes.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = create_cors_layer(&state.config)?;

    let api_routes = Router::new()
        // Help knowledge base
        .route("/help/", get(help::list_help))
        .route(
            "/help/categories/",
            get(help::list_help_categories).post(help::create_help_category),
        )
        .route(
            "/help/categories/{id}/",
            get(help::get_help_category)
                .patch(help::update_help_category)
                .delete(help::delete_help_category),
        )
        .route("/help/articles/", get(help::list_help_articles).post(help::create_help_article))
        .route(
            "/help/articles/{slug}/",
            get(help::get_help_article)
                .patch(help::update_help_article)
                .delete(help::delete_help_article),
        )
        .route("/help/{slug}/", get(help::get_help_article_by_slug))
        // Accounts and catalog administration
        .route("/users/", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}/",
            get(users::get_user).patch(users::update_user).delete(users::delete_user),
        )
        .route(
            "/categories/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}/",
            get(categories::get_category)
                .patch(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/products/", get(products::list_products).post(products::create_product))
        .route(
            "/products/{id}/",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        // Country-scoped discovery
        .route("/{country}/products/", get(products::list_products_for_country))
        .route("/{country}/{subcategory}/{slug}/", get(products::get_product_by_seo_path))
        .with_state(state);

    let router = api_routes
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(cors);

    Ok(router)
}

/// The assembled application: configuration, shared state, and router.
pub struct Application {
    state: AppState,
    router: Router,
}

impl Application {
    /// Connect to the database per the configuration and assemble the application.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let settings = &config.database.pool;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .idle_timeout((settings.idle_timeout_secs > 0).then(|| Duration::from_secs(settings.idle_timeout_secs)))
            .max_lifetime((settings.max_lifetime_secs > 0).then(|| Duration::from_secs(settings.max_lifetime_secs)))
            .connect(&config.database.url)
            .await?;

        Self::with_pool(config, pool).await
    }

    /// Assemble the application around an existing pool (used by tests).
    /// Runs pending migrations before serving.
    pub async fn with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        migrator().run(&pool).await?;

        let country = CountryResolver::new(&config.country)?;
        let state = AppState::builder().db(pool).config(config).country(country).build();
        let router = build_router(state.clone())?;

        Ok(Self { state, router })
    }

    /// The application router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.state.config.host, self.state.config.port);
        let listener = TcpListener::bind(&addr).await?;
        info!("listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
