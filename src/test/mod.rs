pub mod utils;

use crate::api::models::categories::CategoryResponse;
use crate::api::models::help::{HelpArticleResponse, HelpCategoryResponse};
use crate::api::models::products::ProductResponse;
use crate::api::models::users::UserResponse;
use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use utils::{
    create_test_server, seed_category, seed_help_article, seed_help_category, seed_product, seed_user,
};

/// Public help listing: search narrows by title substring, case-insensitively,
/// and a no-match search still returns an array.
#[sqlx::test]
#[test_log::test]
async fn test_help_listing_and_search(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let category = seed_help_category(&pool, "Accounts", "accounts").await;
    seed_help_article(&pool, category.id, "How to Login", "how-to-login").await;
    seed_help_article(&pool, category.id, "Login troubleshooting", "login-troubleshooting").await;
    seed_help_article(&pool, category.id, "Reset your password", "reset-your-password").await;

    let response = server.get("/help/").await;
    response.assert_status_ok();
    let articles: Vec<HelpArticleResponse> = response.json();
    assert_eq!(articles.len(), 3);

    let response = server.get("/help/").add_query_param("search", "login").await;
    response.assert_status_ok();
    let articles: Vec<HelpArticleResponse> = response.json();
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|article| article.title.to_lowercase().contains("login")));

    // No matches is an empty array, not an error
    let response = server.get("/help/").add_query_param("search", "shipping").await;
    response.assert_status_ok();
    let articles: Vec<HelpArticleResponse> = response.json();
    assert!(articles.is_empty());
}

#[sqlx::test]
#[test_log::test]
async fn test_help_detail_by_slug(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let category = seed_help_category(&pool, "Accounts", "accounts").await;
    seed_help_article(&pool, category.id, "How to Login", "how-to-login").await;

    let response = server.get("/help/how-to-login/").await;
    response.assert_status_ok();
    let article: HelpArticleResponse = response.json();
    assert_eq!(article.title, "How to Login");

    let response = server.get("/help/no-such-article/").await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Article not found" }));
}

#[sqlx::test]
#[test_log::test]
async fn test_help_category_crud(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let response = server
        .post("/help/categories/")
        .json(&json!({ "name": "Payments", "slug": "payments" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: HelpCategoryResponse = response.json();

    let response = server
        .patch(&format!("/help/categories/{}/", created.id))
        .json(&json!({ "name": "Payments & Billing" }))
        .await;
    response.assert_status_ok();
    let updated: HelpCategoryResponse = response.json();
    assert_eq!(updated.name, "Payments & Billing");
    assert_eq!(updated.slug, "payments");

    let response = server.delete(&format!("/help/categories/{}/", created.id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/help/categories/{}/", created.id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

/// Deleting a help category cascades to its articles.
#[sqlx::test]
#[test_log::test]
async fn test_help_category_delete_cascades_articles(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let category = seed_help_category(&pool, "Accounts", "accounts").await;
    seed_help_article(&pool, category.id, "How to Login", "how-to-login").await;

    let response = server.delete(&format!("/help/categories/{}/", category.id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get("/help/how-to-login/").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[test_log::test]
async fn test_country_product_listing(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let ama = seed_user(&pool, "Ama", "ama@example.com", Some("GH")).await;
    let ngozi = seed_user(&pool, "Ngozi", "ngozi@example.com", Some("NG")).await;

    let electronics = seed_category(&pool, "Electronics", None).await;
    let phones = seed_category(&pool, "Phones", Some(electronics.id)).await;

    seed_product(&pool, "Samsung Galaxy S20", phones.id, Some(ama.id)).await;
    seed_product(&pool, "MacBook Pro 2023", electronics.id, Some(ngozi.id)).await;

    let response = server.get("/gh/products/").await;
    response.assert_status_ok();
    let products: Vec<ProductResponse> = response.json();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].created_by_name, "Ama");
    assert_eq!(products[0].created_by_country, "gh");
    assert_eq!(products[0].category_path, "Electronics > Phones");
    assert_eq!(products[0].product_url, "/gh/electronics/phones/samsung-galaxy-s20");

    // Country comparison is case-insensitive
    let response = server.get("/GH/products/").await;
    response.assert_status_ok();

    // A country with no products is the fixed 404 message
    let response = server.get("/fr/products/").await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "message": "No products found for this country." }));
}

#[sqlx::test]
#[test_log::test]
async fn test_product_seo_detail(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let ama = seed_user(&pool, "Ama", "ama@example.com", Some("GH")).await;
    let electronics = seed_category(&pool, "Electronics", None).await;
    let phones = seed_category(&pool, "Phones", Some(electronics.id)).await;
    seed_product(&pool, "Samsung Galaxy S20", phones.id, Some(ama.id)).await;

    // Matched on (slug, creator country, immediate category slug)
    let response = server.get("/gh/phones/samsung-galaxy-s20/").await;
    response.assert_status_ok();
    let product: ProductResponse = response.json();
    assert_eq!(product.product_url, "/gh/electronics/phones/samsung-galaxy-s20");
    assert_eq!(product.category_path, "Electronics > Phones");

    // Wrong country
    let response = server.get("/ng/phones/samsung-galaxy-s20/").await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Product not found." }));

    // The path segment is the immediate category slug, not an ancestor's
    let response = server.get("/gh/electronics/samsung-galaxy-s20/").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[test_log::test]
async fn test_category_crud_and_slug_derivation(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let response = server.post("/categories/").json(&json!({ "name": "Mobile Phones" })).await;
    response.assert_status(StatusCode::CREATED);
    let root: CategoryResponse = response.json();
    assert_eq!(root.slug, "mobile-phones");
    assert_eq!(root.full_slug.as_deref(), Some("mobile-phones"));

    let response = server
        .post("/categories/")
        .json(&json!({ "name": "Android", "parent_id": root.id }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let child: CategoryResponse = response.json();
    assert_eq!(child.full_slug.as_deref(), Some("mobile-phones/android"));

    // Duplicate name is a conflict
    let response = server.post("/categories/").json(&json!({ "name": "Mobile Phones" })).await;
    response.assert_status(StatusCode::CONFLICT);
}

/// A parent assignment whose ancestor chain contains the category itself is
/// rejected and the tree is left unchanged.
#[sqlx::test]
#[test_log::test]
async fn test_category_cycle_rejected(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let a = seed_category(&pool, "A", None).await;
    let b = seed_category(&pool, "B", Some(a.id)).await;
    let c = seed_category(&pool, "C", Some(b.id)).await;

    let response = server
        .patch(&format!("/categories/{}/", a.id))
        .json(&json!({ "parent_id": c.id }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Self-parenting is the degenerate cycle
    let response = server
        .patch(&format!("/categories/{}/", a.id))
        .json(&json!({ "parent_id": a.id }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get(&format!("/categories/{}/", a.id)).await;
    response.assert_status_ok();
    let a_now: CategoryResponse = response.json();
    assert_eq!(a_now.parent_id, None);
}

#[sqlx::test]
#[test_log::test]
async fn test_user_crud_and_unique_email(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let response = server
        .post("/users/")
        .json(&json!({ "email": "ama@example.com", "name": "Ama", "country": "GH" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let user: UserResponse = response.json();
    assert!(user.is_active);
    assert!(!user.is_staff);

    let response = server
        .post("/users/")
        .json(&json!({ "email": "ama@example.com", "name": "Someone Else" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let response = server
        .patch(&format!("/users/{}/", user.id))
        .json(&json!({ "country": null, "is_staff": true }))
        .await;
    response.assert_status_ok();
    let updated: UserResponse = response.json();
    assert_eq!(updated.country, None);
    assert!(updated.is_staff);
}

/// Deleting a user keeps their products, serialized with the global/unknown
/// placeholders.
#[sqlx::test]
#[test_log::test]
async fn test_user_delete_nulls_product_creator(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let ama = seed_user(&pool, "Ama", "ama@example.com", Some("GH")).await;
    let electronics = seed_category(&pool, "Electronics", None).await;
    let product = seed_product(&pool, "Samsung Galaxy S20", electronics.id, Some(ama.id)).await;

    let response = server.delete(&format!("/users/{}/", ama.id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/products/{}/", product.id)).await;
    response.assert_status_ok();
    let product: ProductResponse = response.json();
    assert_eq!(product.created_by_name, "Unknown");
    assert_eq!(product.created_by_country, "unknown");
    assert_eq!(product.product_url, "/global/electronics/samsung-galaxy-s20");
}

#[sqlx::test]
#[test_log::test]
async fn test_product_crud(pool: PgPool) {
    let server = create_test_server(pool.clone());

    let electronics = seed_category(&pool, "Electronics", None).await;

    let response = server
        .post("/products/")
        .json(&json!({
            "title": "Bluetooth Speaker",
            "description": "Portable speaker",
            "category_id": electronics.id,
            "price": 49.99,
            "images": ["https://img.example/speaker.jpg"]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: ProductResponse = response.json();
    assert_eq!(created.product_url, "/global/electronics/bluetooth-speaker");

    let response = server
        .patch(&format!("/products/{}/", created.id))
        .json(&json!({ "title": "Bluetooth Speaker v2", "slug": "" }))
        .await;
    response.assert_status_ok();
    let updated: ProductResponse = response.json();
    assert_eq!(updated.title, "Bluetooth Speaker v2");
    assert_eq!(updated.product_url, "/global/electronics/bluetooth-speaker-v2");

    let response = server.delete(&format!("/products/{}/", created.id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/products/{}/", created.id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}
