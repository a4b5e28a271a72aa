//! Server configuration.
//!
//! Loaded from `blackmarch.toml` (or a `.json` file), then overridden by
//! `BLACKMARCH_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blackmarch_commerce::money::DEFAULT_IDR_PER_USD;
use blackmarch_commerce::storefront::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

use crate::telemetry::{LogFormat, LogLevel};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["blackmarch.toml", ".blackmarch.toml", "blackmarch.json"];

pub const ENV_DATABASE_PATH: &str = "BLACKMARCH_DATABASE_PATH";
pub const ENV_PORT: &str = "BLACKMARCH_PORT";
pub const ENV_WHATSAPP_NUMBER: &str = "BLACKMARCH_WHATSAPP_NUMBER";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Find a config file in `start` or one of its parents.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply `BLACKMARCH_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATABASE_PATH).filter(|v| !v.is_empty()) {
            self.database.path = path;
        }
        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("{} is not a valid port: {}", ENV_PORT, port))?;
        }
        if let Some(number) = lookup(ENV_WHATSAPP_NUMBER).filter(|v| !v.is_empty()) {
            self.store.whatsapp_number = number;
        }
        Ok(())
    }

    /// Address to bind, e.g. "127.0.0.1:3000".
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for paths no route handles (cover images).
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_dir() -> String {
    "public".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
        }
    }
}

/// SQLite database settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    "data/blackmarch.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Storefront settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store name used in page titles and order messages.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Number that receives WhatsApp orders, in international format.
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Rupiah per US dollar for the admin currency toggle.
    #[serde(default = "default_idr_exchange_rate")]
    pub idr_exchange_rate: f64,
}

fn default_store_name() -> String {
    "Blackmarch".to_string()
}

fn default_whatsapp_number() -> String {
    "6281234567890".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_idr_exchange_rate() -> f64 {
    DEFAULT_IDR_PER_USD
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            whatsapp_number: default_whatsapp_number(),
            page_size: default_page_size(),
            idr_exchange_rate: default_idr_exchange_rate(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a commented default `blackmarch.toml`.
pub fn generate_default_config() -> String {
    format!(
        r#"# Blackmarch record store configuration

[server]
host = "{host}"
port = {port}
public_dir = "{public_dir}"

[database]
# Overridden by BLACKMARCH_DATABASE_PATH
path = "{database}"

[store]
name = "{name}"
# Overridden by BLACKMARCH_WHATSAPP_NUMBER
whatsapp_number = "{whatsapp}"
page_size = {page_size}
idr_exchange_rate = {rate:.1}

[logging]
# trace, debug, info, warn or error; RUST_LOG takes precedence
level = "info"
# json or human
format = "json"
"#,
        host = default_host(),
        port = default_port(),
        public_dir = default_public_dir(),
        database = default_database_path(),
        name = default_store_name(),
        whatsapp = default_whatsapp_number(),
        page_size = default_page_size(),
        rate = default_idr_exchange_rate(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.page_size, 12);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: AppConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [store]
            name = "Nordic Cult"

            [logging]
            format = "human"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.name, "Nordic Cult");
        assert_eq!(config.store.whatsapp_number, "6281234567890");
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DATABASE_PATH, "/var/lib/blackmarch.db"),
            (ENV_PORT, "8080"),
            (ENV_WHATSAPP_NUMBER, "+47 912 34 567"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.database.path, "/var/lib/blackmarch.db");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.whatsapp_number, "+47 912 34 567");
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| (key == ENV_PORT).then(|| "eighty".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_load_and_discover() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = AppConfig::default();
        config.server.port = 4000;
        let path = dir.path().join("blackmarch.toml");
        config.save(&path).unwrap();

        assert_eq!(AppConfig::discover(&nested), Some(path.clone()));
        assert_eq!(AppConfig::load(&path).unwrap().server.port, 4000);

        let json_path = dir.path().join("export.json");
        config.save(&json_path).unwrap();
        assert_eq!(AppConfig::load(&json_path).unwrap(), config);
    }
}
