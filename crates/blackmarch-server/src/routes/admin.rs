//! Admin dashboard: product table and create/edit/delete forms.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use blackmarch_commerce::catalog::{NumberOrText, ProductInput};
use blackmarch_commerce::{Currency, ProductId};
use serde::Deserialize;

use crate::error::{ApiError, PageError};
use crate::render::{self, AdminView, FormMode};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AdminParams {
    pub currency: Option<String>,
}

/// Product form as posted by the browser. Checkboxes are absent when
/// unchecked.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub artist: String,
    pub format: String,
    pub genre: String,
    pub subgenre: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub year: String,
    pub label: String,
    pub in_stock: Option<String>,
    pub limited: Option<String>,
}

impl ProductForm {
    fn into_input(self) -> ProductInput {
        ProductInput {
            name: self.name,
            artist: self.artist,
            format: self.format,
            genre: self.genre,
            subgenre: Some(self.subgenre),
            price: Some(NumberOrText::Text(self.price)),
            image: Some(self.image),
            description: Some(self.description),
            in_stock: Some(self.in_stock.is_some()),
            year: Some(NumberOrText::Text(self.year)),
            label: Some(self.label),
            limited: Some(self.limited.is_some()),
        }
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<AdminParams>,
) -> Result<Html<String>, PageError> {
    let currency = params
        .currency
        .as_deref()
        .and_then(Currency::from_code)
        .unwrap_or_default();
    let products = state
        .with_db("fetch products", |db| db.products().list_all())
        .await?;

    Ok(Html(render::admin_page(&AdminView {
        store_name: &state.store.name,
        products: &products,
        currency,
        idr_per_usd: state.store.idr_per_usd,
    })))
}

pub async fn new_form(State(state): State<AppState>) -> Html<String> {
    Html(render::product_form(
        &state.store.name,
        FormMode::New,
        &ProductInput::default(),
        &[],
    ))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = ProductId::new(id);
    let lookup = id.clone();
    let product = state
        .with_db("fetch product", move |db| db.products().get(&lookup))
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Html(render::product_form(
        &state.store.name,
        FormMode::Edit(&id),
        &ProductInput::from_product(&product),
        &[],
    )))
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response, PageError> {
    let input = form.into_input();
    let submitted = input.clone();
    let result = state
        .with_db("create product", move |db| db.products().create(submitted))
        .await;

    saved_or_form(&state, FormMode::New, &input, result.map(|_| ()))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response, PageError> {
    let id = ProductId::new(id);
    let input = form.into_input();
    let (target, submitted) = (id.clone(), input.clone());
    let result = state
        .with_db("update product", move |db| db.products().update(&target, submitted))
        .await;

    saved_or_form(&state, FormMode::Edit(&id), &input, result.map(|_| ()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    let id = ProductId::new(id);
    state
        .with_db("delete product", move |db| db.products().delete(&id))
        .await?;
    Ok(Redirect::to("/admin"))
}

/// Back to the dashboard on success; the form again, with messages, when
/// validation failed.
fn saved_or_form(
    state: &AppState,
    mode: FormMode<'_>,
    input: &ProductInput,
    result: Result<(), ApiError>,
) -> Result<Response, PageError> {
    match result {
        Ok(()) => Ok(Redirect::to("/admin").into_response()),
        Err(ApiError::Validation { details, .. }) => {
            let html = render::product_form(&state.store.name, mode, input, &details);
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
