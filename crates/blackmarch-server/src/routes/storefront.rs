//! Storefront page and cookie-backed cart.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use blackmarch_commerce::cart::{decode_lines, encode_lines, Cart};
use blackmarch_commerce::catalog::Product;
use blackmarch_commerce::search::{ProductQuery, MAX_LIMIT};
use blackmarch_commerce::storefront::{browse, BrowseOptions};
use blackmarch_commerce::ProductId;
use blackmarch_db::seed;
use serde::Deserialize;

use crate::error::{ApiError, PageError};
use crate::render::{self, StorefrontView};
use crate::state::AppState;

/// Cookie holding the cart as `id:qty|id:qty`.
pub const CART_COOKIE: &str = "blackmarch_cart";

const CART_MAX_AGE_SECS: u32 = 60 * 60 * 24 * 30;
const SAMPLE_NOTICE: &str = "The catalog is unavailable right now; showing featured releases.";

#[derive(Debug, Default, Deserialize)]
pub struct StorefrontParams {
    pub search: Option<String>,
    pub format: Option<String>,
    pub genre: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CartForm {
    #[serde(default)]
    pub product_id: String,
    pub quantity: Option<String>,
    pub return_to: Option<String>,
}

pub async fn storefront(
    State(state): State<AppState>,
    Query(params): Query<StorefrontParams>,
    headers: HeaderMap,
) -> Html<String> {
    let options = BrowseOptions::from_params(
        params.search.as_deref(),
        params.format.as_deref(),
        params.genre.as_deref(),
        params.sort.as_deref(),
        params.page.as_deref(),
    )
    .with_page_size(state.store.page_size);

    let (products, notice) = match load_catalog(&state).await {
        Ok(products) => (products, None),
        Err(_) => {
            tracing::warn!("Falling back to the sample catalog");
            (seed::sample_catalog(), Some(SAMPLE_NOTICE))
        }
    };
    let cart = load_cart(&state, &headers).await;
    let page = browse(&products, &options);

    Html(render::storefront_page(&StorefrontView {
        store_name: &state.store.name,
        options: &options,
        page: &page,
        cart: &cart,
        whatsapp: &state.store.whatsapp,
        notice,
    }))
}

pub async fn cart_add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CartForm>,
) -> Result<Response, PageError> {
    let quantity = parse_quantity(form.quantity.as_deref())?;
    let id = ProductId::new(form.product_id.trim());
    let product = find_products(&state, vec![id])
        .await
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    let mut cart = load_cart(&state, &headers).await;
    cart.add_product(&product, quantity)?;
    tracing::debug!(id = %product.id, quantity, "Added to cart");

    Ok(save_cart(&cart, form.return_to))
}

pub async fn cart_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CartForm>,
) -> Result<Response, PageError> {
    let quantity = parse_quantity(form.quantity.as_deref())?;
    let mut cart = load_cart(&state, &headers).await;
    cart.update_quantity(&ProductId::new(form.product_id.trim()), quantity)?;
    Ok(save_cart(&cart, form.return_to))
}

pub async fn cart_remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CartForm>,
) -> Response {
    let mut cart = load_cart(&state, &headers).await;
    cart.remove_item(&ProductId::new(form.product_id.trim()));
    save_cart(&cart, form.return_to)
}

pub async fn cart_clear(Form(form): Form<CartForm>) -> Response {
    save_cart(&Cart::new(), form.return_to)
}

/// First page of the catalog at the largest page size.
async fn load_catalog(state: &AppState) -> Result<Vec<Product>, ApiError> {
    let query = ProductQuery::new().with_pagination(1, MAX_LIMIT);
    let page = state
        .with_db("fetch products", move |db| db.products().list(&query))
        .await?;
    Ok(page.products)
}

/// Look up products by id, keeping request order and skipping unknown ids.
/// Falls back to the sample catalog when the store cannot be read.
async fn find_products(state: &AppState, ids: Vec<ProductId>) -> Vec<Product> {
    let lookup = ids.clone();
    let found = state
        .with_db("fetch cart products", move |db| {
            let store = db.products();
            lookup
                .iter()
                .filter_map(|id| store.get(id).transpose())
                .collect::<Result<Vec<_>, _>>()
        })
        .await;

    match found {
        Ok(products) => products,
        Err(_) => {
            let sample = seed::sample_catalog();
            ids.iter()
                .filter_map(|id| sample.iter().find(|p| &p.id == id).cloned())
                .collect()
        }
    }
}

/// Rebuild the cart from its cookie with current prices and stock.
/// Lines for missing or sold-out products are dropped.
async fn load_cart(state: &AppState, headers: &HeaderMap) -> Cart {
    let lines = cookie_value(headers, CART_COOKIE)
        .map(|token| decode_lines(&token))
        .unwrap_or_default();
    if lines.is_empty() {
        return Cart::new();
    }

    let products = find_products(state, lines.iter().map(|(id, _)| id.clone()).collect()).await;
    let mut cart = Cart::new();
    for (id, quantity) in lines {
        if let Some(product) = products.iter().find(|p| p.id == id) {
            if let Err(err) = cart.add_product(product, quantity) {
                tracing::debug!(id = %id, error = %err, "Dropped cart line");
            }
        }
    }
    cart
}

fn save_cart(cart: &Cart, return_to: Option<String>) -> Response {
    let cookie = if cart.is_empty() {
        format!("{}=; Path=/; Max-Age=0; SameSite=Lax; HttpOnly", CART_COOKIE)
    } else {
        format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax; HttpOnly",
            CART_COOKIE,
            encode_lines(cart),
            CART_MAX_AGE_SECS
        )
    };

    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&safe_return_path(return_to)),
    )
        .into_response()
}

fn parse_quantity(raw: Option<&str>) -> Result<i64, ApiError> {
    match raw.map(str::trim).filter(|q| !q.is_empty()) {
        None => Ok(1),
        Some(q) => q
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid quantity: {}", q))),
    }
}

/// Only same-site paths are followed after a cart change. Browsers read
/// `/\` like `//`, and the target must fit in a `Location` header.
fn safe_return_path(target: Option<String>) -> String {
    match target {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control)
                && HeaderValue::from_str(&path).is_ok() =>
        {
            path
        }
        _ => "/".to_string(),
    }
}

/// Value of the named cookie from the `Cookie` request headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
