//! JSON catalog API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use blackmarch_commerce::cart::Cart;
use blackmarch_commerce::catalog::{Category, CategoryType, Product, ProductInput};
use blackmarch_commerce::checkout::WhatsAppLink;
use blackmarch_commerce::search::{ProductPage, ProductQuery};
use blackmarch_commerce::{CommerceError, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::render;
use crate::state::AppState;

const MAX_PLACEHOLDER_SIZE: u32 = 4000;

#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub format: Option<String>,
    pub genre: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
    pub message: String,
    /// Order total in USD.
    pub total: f64,
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<Json<ProductPage>, ApiError> {
    let query = ProductQuery::from_params(
        params.format.as_deref(),
        params.genre.as_deref(),
        params.search.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
    );

    let page = state
        .with_db("fetch products", move |db| db.products().list(&query))
        .await?;
    Ok(Json(page))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let product = state
        .with_db("create product", move |db| db.products().create(input))
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = ProductId::new(id);
    state
        .with_db("fetch product", move |db| db.products().get(&id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = ProductId::new(id);
    let product = state
        .with_db("update product", move |db| db.products().update(&id, input))
        .await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ProductId::new(id);
    state
        .with_db("delete product", move |db| db.products().delete(&id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let category_type = params
        .category_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::parse::<CategoryType>)
        .transpose()?;

    let categories = state
        .with_db("fetch categories", move |db| db.categories().list(category_type))
        .await?;
    Ok(Json(categories))
}

pub async fn placeholder(
    Path((width, height)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let width = parse_dimension(&width)?;
    let height = parse_dimension(&height)?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        render::placeholder_svg(width, height),
    ))
}

fn parse_dimension(raw: &str) -> Result<u32, ApiError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|v| (1..=MAX_PLACEHOLDER_SIZE).contains(v))
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Invalid dimension '{}': expected an integer from 1 to {}",
                raw, MAX_PLACEHOLDER_SIZE
            ))
        })
}

pub async fn product_whatsapp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WhatsAppLink>, ApiError> {
    let id = ProductId::new(id);
    let product = state
        .with_db("fetch product", move |db| db.products().get(&id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    let link = state.store.whatsapp.product_link(&state.store.name, &product)?;
    Ok(Json(link))
}

pub async fn checkout_whatsapp(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if request.items.is_empty() {
        return Err(CommerceError::EmptyCart.into());
    }

    let ids: Vec<ProductId> = request
        .items
        .iter()
        .map(|item| ProductId::new(item.product_id.as_str()))
        .collect();
    let products = state
        .with_db("fetch products", move |db| {
            let store = db.products();
            ids.iter().map(|id| store.get(id)).collect::<Result<Vec<_>, _>>()
        })
        .await?;

    let mut cart = Cart::new();
    for (item, product) in request.items.iter().zip(products) {
        let product = product.ok_or_else(|| {
            ApiError::NotFound(format!("Product not found: {}", item.product_id))
        })?;
        cart.add_product(&product, item.quantity)?;
    }

    let link = state.store.whatsapp.cart_link(&state.store.name, &cart)?;
    let total = cart.total()?;
    tracing::info!(
        lines = cart.unique_item_count(),
        items = cart.item_count(),
        total = %total,
        "WhatsApp checkout link created"
    );

    Ok(Json(CheckoutResponse {
        url: link.url,
        message: link.message,
        total: total.to_decimal(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("300").unwrap(), 300);
        assert_eq!(parse_dimension("4000").unwrap(), 4000);
        assert!(parse_dimension("0").is_err());
        assert!(parse_dimension("4001").is_err());
        assert!(parse_dimension("12.5").is_err());
        assert!(parse_dimension("wide").is_err());
    }

    #[test]
    fn test_checkout_request_defaults_quantity() {
        let request: CheckoutRequest =
            serde_json::from_str(r#"{"items":[{"productId":"1"},{"productId":"2","quantity":3}]}"#)
                .unwrap();
        assert_eq!(request.items[0].quantity, 1);
        assert_eq!(request.items[1].quantity, 3);
    }
}
