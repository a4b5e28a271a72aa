//! Blackmarch HTTP server.
//!
//! Serves the storefront, the admin dashboard and the JSON catalog API
//! from one axum [`Router`].
//!
//! # Routes
//!
//! - `GET /` storefront, `POST /cart/{add,update,remove,clear}`
//! - `GET /admin`, `/admin/products/new`, `/admin/products/:id/edit`,
//!   `POST /admin/products[/:id[/delete]]`
//! - `/api/products[/:id[/whatsapp]]`, `/api/categories`,
//!   `/api/placeholder/:width/:height`, `POST /api/checkout/whatsapp`
//! - `GET /health`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use blackmarch_db::Db;
//! use blackmarch_server::{serve, AppConfig, AppState};
//!
//! let config = AppConfig::default();
//! let state = AppState::new(Db::open(&config.database.path)?, &config)?;
//! serve(state, &config.bind_addr()).await?;
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
mod server;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{ApiError, PageError};
pub use server::{create_router, serve, REQUEST_ID_HEADER};
pub use state::{AppState, StoreSettings};
