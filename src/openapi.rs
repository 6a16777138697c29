//! OpenAPI documentation assembly.
//!
//! The document is generated from the `#[utoipa::path]` annotations on the
//! handlers and served at `/api-docs/openapi.json`, with a Scalar UI mounted
//! at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Country-aware marketplace catalog and help center API"
    ),
    paths(
        crate::api::handlers::help::list_help,
        crate::api::handlers::help::get_help_article_by_slug,
        crate::api::handlers::help::list_help_categories,
        crate::api::handlers::help::create_help_category,
        crate::api::handlers::help::get_help_category,
        crate::api::handlers::help::update_help_category,
        crate::api::handlers::help::delete_help_category,
        crate::api::handlers::help::list_help_articles,
        crate::api::handlers::help::create_help_article,
        crate::api::handlers::help::get_help_article,
        crate::api::handlers::help::update_help_article,
        crate::api::handlers::help::delete_help_article,
        crate::api::handlers::products::list_products_for_country,
        crate::api::handlers::products::get_product_by_seo_path,
        crate::api::handlers::products::list_products,
        crate::api::handlers::products::create_product,
        crate::api::handlers::products::get_product,
        crate::api::handlers::products::update_product,
        crate::api::handlers::products::delete_product,
        crate::api::handlers::categories::list_categories,
        crate::api::handlers::categories::create_category,
        crate::api::handlers::categories::get_category,
        crate::api::handlers::categories::update_category,
        crate::api::handlers::categories::delete_category,
        crate::api::handlers::users::list_users,
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user,
    ),
    components(schemas(
        crate::api::models::help::HelpArticleResponse,
        crate::api::models::help::HelpArticleCreate,
        crate::api::models::help::HelpArticleUpdate,
        crate::api::models::help::HelpCategoryResponse,
        crate::api::models::help::HelpCategoryCreate,
        crate::api::models::help::HelpCategoryUpdate,
        crate::api::models::products::ProductResponse,
        crate::api::models::products::ProductCreate,
        crate::api::models::products::ProductUpdate,
        crate::api::models::categories::CategoryResponse,
        crate::api::models::categories::CategoryCreate,
        crate::api::models::categories::CategoryUpdate,
        crate::api::models::users::UserResponse,
        crate::api::models::users::UserCreate,
        crate::api::models::users::UserUpdate,
    )),
    tags(
        (name = "help", description = "Help knowledge base"),
        (name = "products", description = "Product catalog and country-scoped discovery"),
        (name = "categories", description = "Product category tree"),
        (name = "users", description = "User accounts"),
    )
)]
pub struct ApiDoc;
