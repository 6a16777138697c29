//! Handlers for the product catalog: country-scoped discovery routes and
//! plain resource CRUD.

use crate::api::models::products::{CountryQuery, ListProductsQuery, ProductCreate, ProductResponse, ProductUpdate};
use crate::country::ClientIp;
use crate::db::handlers::products::ProductFilter;
use crate::db::handlers::{Categories, Products, Repository, Users};
use crate::db::models::categories::CategoryDBResponse;
use crate::db::models::products::{ProductCreateDBRequest, ProductDBResponse, ProductUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{CategoryId, ProductId};
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sqlx::PgConnection;
use std::collections::{HashMap, HashSet};

/// Resolve the effective country for a request: the path segment when present,
/// otherwise the resolver (query override, client address, default).
async fn effective_country(state: &AppState, path_country: &str, query_country: Option<&str>, client_ip: ClientIp) -> String {
    let path_country = path_country.trim().to_lowercase();
    if !path_country.is_empty() {
        return path_country;
    }
    state.country.resolve(query_country, client_ip.0).await
}

/// Assemble wire responses for a batch of product rows.
///
/// Creators are fetched in bulk; category chains are fetched once per distinct
/// category.
async fn build_product_responses(conn: &mut PgConnection, products: Vec<ProductDBResponse>) -> Result<Vec<ProductResponse>> {
    let creator_ids: Vec<_> = products
        .iter()
        .filter_map(|product| product.created_by)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let creators = {
        let mut repo = Users::new(&mut *conn);
        repo.get_bulk(creator_ids).await?
    };

    let category_ids: HashSet<CategoryId> = products.iter().map(|product| product.category_id).collect();
    let mut chains: HashMap<CategoryId, Vec<CategoryDBResponse>> = HashMap::new();
    {
        let mut repo = Categories::new(&mut *conn);
        for category_id in category_ids {
            chains.insert(category_id, repo.path(category_id).await?);
        }
    }

    Ok(products
        .into_iter()
        .map(|product| {
            let creator = product.created_by.and_then(|id| creators.get(&id));
            let chain = chains.get(&product.category_id).map(Vec::as_slice).unwrap_or(&[]);
            ProductResponse::build(product, creator, chain)
        })
        .collect())
}

async fn build_product_response(conn: &mut PgConnection, product: ProductDBResponse) -> Result<ProductResponse> {
    let mut responses = build_product_responses(conn, vec![product]).await?;
    responses.pop().ok_or_else(|| Error::Internal {
        operation: "assemble product response".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/{country}/products/",
    tag = "products",
    summary = "List products for a country",
    params(
        ("country" = String, Path, description = "ISO country code; creator country must match case-insensitively"),
        CountryQuery,
    ),
    responses(
        (status = 200, description = "Products created by users from this country", body = Vec<ProductResponse>),
        (status = 404, description = "No products found for this country"),
    )
)]
#[tracing::instrument(skip_all, fields(country = %country))]
pub async fn list_products_for_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(query): Query<CountryQuery>,
    client_ip: ClientIp,
) -> Result<Json<Vec<ProductResponse>>> {
    let country = effective_country(&state, &country, query.country.as_deref(), client_ip).await;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let products = {
        let mut repo = Products::new(&mut conn);
        repo.list(&ProductFilter::by_country(&country)).await?
    };

    if products.is_empty() {
        tracing::info!(%country, "no products found for country");
        return Err(Error::NoProductsForCountry);
    }

    let responses = build_product_responses(&mut conn, products).await?;
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/{country}/{subcategory}/{slug}/",
    tag = "products",
    summary = "Get product by SEO path",
    params(
        ("country" = String, Path, description = "ISO country code of the creator"),
        ("subcategory" = String, Path, description = "Immediate category slug"),
        ("slug" = String, Path, description = "Product slug"),
        CountryQuery,
    ),
    responses(
        (status = 200, description = "The matching product", body = ProductResponse),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all, fields(country = %path.0, subcategory = %path.1, slug = %path.2))]
pub async fn get_product_by_seo_path(
    State(state): State<AppState>,
    Path(path): Path<(String, String, String)>,
    Query(query): Query<CountryQuery>,
    client_ip: ClientIp,
) -> Result<Json<ProductResponse>> {
    let (country, subcategory, slug) = path;
    let country = effective_country(&state, &country, query.country.as_deref(), client_ip).await;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let product = {
        let mut repo = Products::new(&mut conn);
        repo.find_by_seo_path(slug.trim(), &country, subcategory.trim(), state.config.catalog.seo_lookup)
            .await?
    };

    let Some(product) = product else {
        tracing::warn!(%slug, %country, %subcategory, "product not found for SEO path");
        return Err(Error::ProductNotFound);
    };

    let response = build_product_response(&mut conn, product).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/products/",
    tag = "products",
    summary = "List products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "All products, paginated", body = Vec<ProductResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(State(state): State<AppState>, Query(query): Query<ListProductsQuery>) -> Result<Json<Vec<ProductResponse>>> {
    let (skip, limit) = query.pagination.params();

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let products = {
        let mut repo = Products::new(&mut conn);
        repo.list(&ProductFilter::page(skip, limit)).await?
    };

    let responses = build_product_responses(&mut conn, products).await?;
    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/products/",
    tag = "products",
    summary = "Create product",
    request_body = ProductCreate,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid category or creator reference"),
        (status = 409, description = "Slug already in use"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_product(State(state): State<AppState>, Json(create): Json<ProductCreate>) -> Result<(StatusCode, Json<ProductResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let product = {
        let mut repo = Products::new(&mut conn);
        repo.create(&ProductCreateDBRequest::from(create)).await?
    };

    let response = build_product_response(&mut conn, product).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/products/{id}/",
    tag = "products",
    summary = "Get product",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_product(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<Json<ProductResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let product = {
        let mut repo = Products::new(&mut conn);
        repo.get_by_id(id).await?
    };

    let Some(product) = product else {
        return Err(Error::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        });
    };

    let response = build_product_response(&mut conn, product).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/products/{id}/",
    tag = "products",
    summary = "Update product",
    request_body = ProductUpdate,
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<ProductResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let product = {
        let mut repo = Products::new(&mut conn);
        match repo.update(id, &ProductUpdateDBRequest::from(update)).await {
            Ok(product) => product,
            Err(crate::db::errors::DbError::NotFound) => {
                return Err(Error::NotFound {
                    resource: "Product".to_string(),
                    id: id.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    };

    let response = build_product_response(&mut conn, product).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/products/{id}/",
    tag = "products",
    summary = "Delete product",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let deleted = {
        let mut repo = Products::new(&mut conn);
        repo.delete(id).await?
    };

    if !deleted {
        return Err(Error::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
