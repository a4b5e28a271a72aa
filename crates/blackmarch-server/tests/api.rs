//! Router integration tests against an in-memory catalog.
//!
//! Run with: cargo test -p blackmarch-server --test api

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use blackmarch_db::seed::{self, Dataset};
use blackmarch_db::Db;
use blackmarch_server::{create_router, AppConfig, AppState, REQUEST_ID_HEADER};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

// Helper: app over a freshly seeded in-memory database
fn test_app() -> (Router, AppState) {
    let db = Db::open_in_memory().expect("in-memory database");
    seed::run(&db, Dataset::Base, |_| {}).expect("base seed");
    let state = AppState::new(db, &AppConfig::default()).expect("app state");
    (create_router(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> Response {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn send_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}

async fn json_response(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Failed to parse JSON")
}

async fn text_response(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).expect("body is UTF-8")
}

async fn product_id_by_name(app: &Router, name: &str) -> String {
    let body = json_response(get(app, "/api/products?limit=100").await).await;
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == name)
        .and_then(|p| p["id"].as_str())
        .unwrap_or_else(|| panic!("no product named {}", name))
        .to_string()
}

fn new_product() -> Value {
    json!({
        "name": "Pentagram",
        "artist": "Gorgoroth",
        "format": "vinyl",
        "genre": "Black Metal",
        "subgenre": "Norwegian Black Metal",
        "price": "38.50",
        "year": 1994,
        "label": "Embassy Productions"
    })
}

// =========================================================================
// Health and middleware
// =========================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app();
    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let body = json_response(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let (app, _) = test_app();
    let response = send(
        &app,
        Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "req-1234")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-1234");
}

// =========================================================================
// Product listing
// =========================================================================

#[tokio::test]
async fn test_list_products_defaults() {
    let (app, _) = test_app();
    let body = json_response(get(&app, "/api/products").await).await;

    assert_eq!(body["products"].as_array().unwrap().len(), 6);
    assert_eq!(
        body["pagination"],
        json!({ "page": 1, "limit": 20, "total": 6, "pages": 1 })
    );
}

#[tokio::test]
async fn test_list_products_filters() {
    let (app, _) = test_app();

    let body = json_response(get(&app, "/api/products?format=vinyl").await).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p["format"] == "VINYL"));

    let body = json_response(get(&app, "/api/products?genre=Merchandise").await).await;
    assert_eq!(body["pagination"]["total"], 2);

    let body = json_response(get(&app, "/api/products?search=HUNGER").await).await;
    assert_eq!(body["products"][0]["name"], "Transilvanian Hunger");

    let body = json_response(get(&app, "/api/products?format=8-track").await).await;
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["pages"], 0);
}

#[tokio::test]
async fn test_list_products_pagination() {
    let (app, _) = test_app();

    let body = json_response(get(&app, "/api/products?page=3&limit=2").await).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["pagination"],
        json!({ "page": 3, "limit": 2, "total": 6, "pages": 3 })
    );

    let body = json_response(get(&app, "/api/products?page=0&limit=500").await).await;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 100);

    let body = json_response(get(&app, "/api/products?page=abc&limit=xyz").await).await;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 20);
}

// =========================================================================
// Product CRUD
// =========================================================================

#[tokio::test]
async fn test_create_and_get_product() {
    let (app, _) = test_app();

    let response = send_json(&app, "POST", "/api/products", new_product()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_response(response).await;
    assert_eq!(created["format"], "VINYL");
    assert_eq!(created["price"], 38.5);
    assert_eq!(created["inStock"], true);
    assert_eq!(created["limited"], false);

    let id = created["id"].as_str().unwrap();
    let response = get(&app, &format!("/api/products/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_response(response).await;
    assert_eq!(fetched["name"], "Pentagram");
    assert_eq!(fetched["year"], 1994);

    // Newest first
    let body = json_response(get(&app, "/api/products").await).await;
    assert_eq!(body["products"][0]["id"], id);
}

#[tokio::test]
async fn test_create_product_validation() {
    let (app, _) = test_app();

    let response = send_json(&app, "POST", "/api/products", json!({ "name": "Untitled" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_response(response).await;
    assert_eq!(body["error"], "Validation failed");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["artist", "genre", "format", "price"]);

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_response(response).await["error"].is_string());
}

#[tokio::test]
async fn test_create_product_rejects_huge_price() {
    let (app, state) = test_app();
    let before = state.db.products().count().unwrap();

    let response = send_json(
        &app,
        "POST",
        "/api/products",
        json!({
            "name": "Filosofem",
            "artist": "Burzum",
            "format": "VINYL",
            "genre": "Black Metal",
            "price": 1e17
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_response(response).await;
    assert_eq!(body["details"][0]["field"], "price");
    assert_eq!(body["details"][0]["message"], "must be at most 1000000");
    assert_eq!(state.db.products().count().unwrap(), before);
}

#[tokio::test]
async fn test_get_missing_product() {
    let (app, _) = test_app();
    let response = get(&app, "/api/products/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_response(response).await["error"], "Product not found");
}

#[tokio::test]
async fn test_update_product_replaces_fields() {
    let (app, _) = test_app();
    let created = json_response(send_json(&app, "POST", "/api/products", new_product()).await).await;
    let id = created["id"].as_str().unwrap();

    let response = send_json(
        &app,
        "PUT",
        &format!("/api/products/{}", id),
        json!({
            "name": "Pentagram",
            "artist": "Gorgoroth",
            "format": "CD",
            "genre": "Black Metal",
            "price": 20,
            "inStock": false
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_response(response).await;
    assert_eq!(updated["format"], "CD");
    assert_eq!(updated["price"], 20.0);
    assert_eq!(updated["inStock"], false);
    assert_eq!(updated["label"], Value::Null);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let response = send_json(&app, "PUT", "/api/products/missing", new_product()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product() {
    let (app, _) = test_app();
    let id = product_id_by_name(&app, "Filosofem").await;
    let uri = format!("/api/products/{}", id);

    let response = send(&app, Request::delete(&uri).body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get(&app, &uri).await.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Request::delete(&uri).body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_hides_cause() {
    let (app, state) = test_app();
    state.db.execute("DROP TABLE products", &[]).unwrap();

    let response = get(&app, "/api/products").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_response(response).await;
    assert_eq!(body["error"], "Failed to fetch products");
}

// =========================================================================
// Categories and placeholders
// =========================================================================

#[tokio::test]
async fn test_list_categories() {
    let (app, _) = test_app();

    let all = json_response(get(&app, "/api/categories").await).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 19);
    assert_eq!(all[0]["type"], "MUSIC_GENRE");

    let genres = json_response(get(&app, "/api/categories?type=MUSIC_GENRE").await).await;
    let genres = genres.as_array().unwrap();
    assert_eq!(genres.len(), 13);
    assert!(genres.iter().all(|c| c["type"] == "MUSIC_GENRE"));

    let formats = json_response(get(&app, "/api/categories?type=record_format").await).await;
    assert_eq!(formats.as_array().unwrap().len(), 6);

    let response = get(&app, "/api/categories?type=LABEL").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_placeholder_svg() {
    let (app, _) = test_app();

    let response = get(&app, "/api/placeholder/300/200").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, max-age=86400"
    );
    let svg = text_response(response).await;
    assert!(svg.contains("300x200"));

    for uri in ["/api/placeholder/0/300", "/api/placeholder/300/4001", "/api/placeholder/a/b"] {
        assert_eq!(get(&app, uri).await.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

// =========================================================================
// WhatsApp ordering
// =========================================================================

#[tokio::test]
async fn test_product_whatsapp_link() {
    let (app, _) = test_app();

    let id = product_id_by_name(&app, "Transilvanian Hunger").await;
    let response = get(&app, &format!("/api/products/{}/whatsapp", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert!(body["url"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/6281234567890?text="));
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Transilvanian Hunger (VINYL) x1 - $45.00"));
    assert!(message.ends_with("Total: $45.00"));

    let sold_out = product_id_by_name(&app, "In the Nightside Eclipse").await;
    let response = get(&app, &format!("/api/products/{}/whatsapp", sold_out)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(&app, "/api/products/missing/whatsapp").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_whatsapp() {
    let (app, _) = test_app();
    let hunger = product_id_by_name(&app, "Transilvanian Hunger").await;
    let patch = product_id_by_name(&app, "Bathory Patch").await;

    let response = send_json(
        &app,
        "POST",
        "/api/checkout/whatsapp",
        json!({ "items": [
            { "productId": hunger, "quantity": 1 },
            { "productId": patch, "quantity": 3 }
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body["total"], 69.0);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("2. "));
    assert!(message.contains("x3 - $24.00"));
    assert!(message.ends_with("Total: $69.00"));
}

#[tokio::test]
async fn test_checkout_whatsapp_errors() {
    let (app, _) = test_app();

    let response = send_json(&app, "POST", "/api/checkout/whatsapp", json!({ "items": [] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_json(
        &app,
        "POST",
        "/api/checkout/whatsapp",
        json!({ "items": [{ "productId": "missing", "quantity": 1 }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let sold_out = product_id_by_name(&app, "In the Nightside Eclipse").await;
    let response = send_json(
        &app,
        "POST",
        "/api/checkout/whatsapp",
        json!({ "items": [{ "productId": sold_out, "quantity": 1 }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let hunger = product_id_by_name(&app, "Transilvanian Hunger").await;
    let response = send_json(
        &app,
        "POST",
        "/api/checkout/whatsapp",
        json!({ "items": [{ "productId": hunger, "quantity": 100 }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =========================================================================
// Storefront and cart
// =========================================================================

#[tokio::test]
async fn test_storefront_page() {
    let (app, _) = test_app();

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = text_response(response).await;
    assert!(html.contains("Found 6 products"));
    assert!(html.contains("Transilvanian Hunger"));
    assert!(html.contains("Your cart is empty"));

    let html = text_response(get(&app, "/?format=vinyl&sort=price-high").await).await;
    assert!(html.contains("Found 2 products"));
    let nightside = html.find("In the Nightside Eclipse").unwrap();
    let hunger = html.find("Transilvanian Hunger").unwrap();
    assert!(nightside < hunger);

    let html = text_response(get(&app, "/?search=zzz").await).await;
    assert!(html.contains("No products found"));
}

#[tokio::test]
async fn test_storefront_falls_back_to_sample_catalog() {
    let (app, state) = test_app();
    state.db.execute("DROP TABLE products", &[]).unwrap();

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = text_response(response).await;
    assert!(html.contains("Found 6 products"));
    assert!(html.contains("showing featured releases"));
}

#[tokio::test]
async fn test_cart_cookie_flow() {
    let (app, _) = test_app();
    let id = product_id_by_name(&app, "Transilvanian Hunger").await;

    let response = send_form(
        &app,
        "/cart/add",
        &format!("product_id={}&quantity=2&return_to=%2F%3Fformat%3Dvinyl", id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/?format=vinyl");
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("blackmarch_cart={}:2;", id)));
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let response = send(
        &app,
        Request::builder()
            .uri("/")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let html = text_response(response).await;
    assert!(html.contains("Cart (2)"));
    assert!(html.contains("Total: $90.00"));
    assert!(html.contains("Checkout via WhatsApp"));

    let response = send_form(&app, "/cart/remove", &format!("product_id={}", id), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
}

#[tokio::test]
async fn test_cart_redirect_stays_on_site() {
    let (app, _) = test_app();

    // CR/LF cannot reach the Location header
    let response = send_form(&app, "/cart/clear", "return_to=%2F%0D%0AX-Evil%3A%201", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(!response.headers().contains_key("x-evil"));

    // Browsers treat a leading "/\" as "//"
    let response = send_form(&app, "/cart/clear", "return_to=%2F%5Cevil.example", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let response = send_form(&app, "/cart/remove", "product_id=x&return_to=%2F%2Fevil.example", None).await;
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_cart_rejects_out_of_stock() {
    let (app, _) = test_app();
    let sold_out = product_id_by_name(&app, "In the Nightside Eclipse").await;

    let response = send_form(&app, "/cart/add", &format!("product_id={}", sold_out), None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(!response.headers().contains_key(header::SET_COOKIE));
}

// =========================================================================
// Admin dashboard
// =========================================================================

#[tokio::test]
async fn test_admin_dashboard_currency() {
    let (app, _) = test_app();

    let html = text_response(get(&app, "/admin").await).await;
    assert!(html.contains("6 products"));
    assert!(html.contains("$45.00"));

    let html = text_response(get(&app, "/admin?currency=IDR").await).await;
    assert!(html.contains("Rp 708.750"));
    assert!(html.contains("OUT OF STOCK"));
}

#[tokio::test]
async fn test_admin_create_update_delete() {
    let (app, _) = test_app();

    let response = send_form(
        &app,
        "/admin/products",
        "name=Dark+Medieval+Times&artist=Satyricon&format=CD&genre=Black+Metal&price=19.99&year=1994&in_stock=on",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin");

    let id = product_id_by_name(&app, "Dark Medieval Times").await;
    let product = json_response(get(&app, &format!("/api/products/{}", id)).await).await;
    assert_eq!(product["price"], 19.99);
    assert_eq!(product["inStock"], true);
    assert_eq!(product["limited"], false);

    let html = text_response(get(&app, &format!("/admin/products/{}/edit", id)).await).await;
    assert!(html.contains(r#"value="Dark Medieval Times""#));

    let response = send_form(
        &app,
        &format!("/admin/products/{}", id),
        "name=Dark+Medieval+Times&artist=Satyricon&format=VINYL&genre=Black+Metal&price=40&limited=on",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let product = json_response(get(&app, &format!("/api/products/{}", id)).await).await;
    assert_eq!(product["format"], "VINYL");
    assert_eq!(product["inStock"], false);
    assert_eq!(product["limited"], true);

    let response = send_form(&app, &format!("/admin/products/{}/delete", id), "", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        get(&app, &format!("/api/products/{}", id)).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_admin_form_validation() {
    let (app, _) = test_app();

    let response = send_form(&app, "/admin/products", "name=Nameless&price=cheap", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = text_response(response).await;
    assert!(html.contains("is required"));
    assert!(html.contains("must be a number"));
    assert!(html.contains(r#"value="Nameless""#));

    let response = get(&app, "/admin/products/missing/edit").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
