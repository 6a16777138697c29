//! Test utilities for integration testing

use crate::country::CountryResolver;
use crate::db::handlers::{Categories, HelpArticles, HelpCategories, Products, Repository, Users};
use crate::db::models::categories::{CategoryCreateDBRequest, CategoryDBResponse};
use crate::db::models::help::{HelpArticleCreateDBRequest, HelpArticleDBResponse, HelpCategoryCreateDBRequest, HelpCategoryDBResponse};
use crate::db::models::products::{ProductCreateDBRequest, ProductDBResponse};
use crate::db::models::users::{UserCreateDBRequest, UserDBResponse};
use crate::types::{CategoryId, UserId};
use crate::{AppState, Config, build_router};
use axum_test::TestServer;
use rust_decimal::Decimal;
use sqlx::PgPool;

pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    // Tests must never perform real network lookups
    config.country.geolocation.enabled = false;
    config
}

pub fn create_test_server(pool: PgPool) -> TestServer {
    create_test_server_with_config(pool, create_test_config())
}

pub fn create_test_server_with_config(pool: PgPool, config: Config) -> TestServer {
    let country = CountryResolver::new(&config.country).expect("Failed to build country resolver");
    let state = AppState::builder().db(pool).config(config).country(country).build();
    let router = build_router(state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

pub async fn seed_user(pool: &PgPool, name: &str, email: &str, country: Option<&str>) -> UserDBResponse {
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = Users::new(&mut conn);
    repo.create(&UserCreateDBRequest {
        email: email.to_string(),
        name: name.to_string(),
        country: country.map(|c| c.to_string()),
        is_active: true,
        is_staff: false,
    })
    .await
    .expect("seed user")
}

pub async fn seed_category(pool: &PgPool, name: &str, parent_id: Option<CategoryId>) -> CategoryDBResponse {
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = Categories::new(&mut conn);
    repo.create(&CategoryCreateDBRequest {
        name: name.to_string(),
        slug: None,
        parent_id,
    })
    .await
    .expect("seed category")
}

pub async fn seed_product(
    pool: &PgPool,
    title: &str,
    category_id: CategoryId,
    created_by: Option<UserId>,
) -> ProductDBResponse {
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = Products::new(&mut conn);
    repo.create(&ProductCreateDBRequest {
        title: title.to_string(),
        description: format!("{title} description"),
        slug: None,
        category_id,
        price: Decimal::new(129_999, 2),
        images: vec![format!("https://img.example/{title}.jpg")],
        created_by,
    })
    .await
    .expect("seed product")
}

pub async fn seed_help_category(pool: &PgPool, name: &str, slug: &str) -> HelpCategoryDBResponse {
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = HelpCategories::new(&mut conn);
    repo.create(&HelpCategoryCreateDBRequest {
        name: name.to_string(),
        slug: slug.to_string(),
    })
    .await
    .expect("seed help category")
}

pub async fn seed_help_article(
    pool: &PgPool,
    category_id: crate::types::HelpCategoryId,
    title: &str,
    slug: &str,
) -> HelpArticleDBResponse {
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = HelpArticles::new(&mut conn);
    repo.create(&HelpArticleCreateDBRequest {
        category_id,
        title: title.to_string(),
        slug: slug.to_string(),
        content: format!("# {title}\n\nSome helpful content."),
    })
    .await
    .expect("seed help article")
}
