//! Router assembly and the listener loop.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{HeaderName, Request};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::routes::{admin, api, storefront};
use crate::state::AppState;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let public_files = ServeDir::new(&state.public_dir);

    Router::new()
        // Health check
        .route("/health", get(api::health_check))

        // Catalog API
        .route("/api/products", get(api::list_products).post(api::create_product))
        .route(
            "/api/products/:id",
            get(api::get_product)
                .put(api::update_product)
                .delete(api::delete_product),
        )
        .route("/api/products/:id/whatsapp", get(api::product_whatsapp))
        .route("/api/categories", get(api::list_categories))
        .route("/api/placeholder/:width/:height", get(api::placeholder))
        .route("/api/checkout/whatsapp", post(api::checkout_whatsapp))

        // Storefront
        .route("/", get(storefront::storefront))
        .route("/cart/add", post(storefront::cart_add))
        .route("/cart/update", post(storefront::cart_update))
        .route("/cart/remove", post(storefront::cart_remove))
        .route("/cart/clear", post(storefront::cart_clear))

        // Admin dashboard
        .route("/admin", get(admin::dashboard))
        .route("/admin/products", post(admin::create))
        .route("/admin/products/new", get(admin::new_form))
        .route("/admin/products/:id", post(admin::update))
        .route("/admin/products/:id/edit", get(admin::edit_form))
        .route("/admin/products/:id/delete", post(admin::delete))

        // Cover images and other static files
        .fallback_service(public_files)

        // Middleware (applied in reverse order)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
