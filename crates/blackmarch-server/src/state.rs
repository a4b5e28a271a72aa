//! Shared handler state.

use std::path::PathBuf;
use std::sync::Arc;

use blackmarch_commerce::checkout::WhatsAppNumber;
use blackmarch_commerce::CommerceError;
use blackmarch_db::{Db, DbError};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Store settings the handlers need, resolved from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub name: String,
    pub whatsapp: WhatsAppNumber,
    pub page_size: usize,
    pub idr_per_usd: f64,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Db>,
    pub store: Arc<StoreSettings>,
    pub public_dir: PathBuf,
}

impl AppState {
    /// Build state from an open database and the loaded config.
    ///
    /// Fails when the configured WhatsApp number cannot be used in links.
    pub fn new(db: Db, config: &AppConfig) -> Result<Self, CommerceError> {
        let store = StoreSettings {
            name: config.store.name.clone(),
            whatsapp: WhatsAppNumber::parse(&config.store.whatsapp_number)?,
            page_size: config.store.page_size.max(1),
            idr_per_usd: config.store.idr_exchange_rate,
        };

        Ok(Self {
            db: Arc::new(db),
            store: Arc::new(store),
            public_dir: PathBuf::from(&config.server.public_dir),
        })
    }

    /// Run a blocking store call off the async runtime.
    ///
    /// `action` names the operation for the "Failed to ..." message.
    pub async fn with_db<F, T>(&self, action: &'static str, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Db) -> Result<T, DbError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))?
            .map_err(|e| ApiError::store(action, e))
    }
}
