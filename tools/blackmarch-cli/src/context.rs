//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use blackmarch_db::Db;
use blackmarch_server::AppConfig;

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, environment overrides applied.
    pub config: AppConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from `--config` or the nearest config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_from(&cwd, config_path, output)
    }

    fn load_from(cwd: &Path, config_path: Option<&str>, output: Output) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => Some(resolve(cwd, path)),
            None => AppConfig::discover(cwd),
        };

        let mut config = match &config_path {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        config.apply_env()?;

        Ok(Self {
            config,
            config_path,
            output,
            cwd: cwd.to_path_buf(),
        })
    }

    /// Open the configured database, creating the schema if needed.
    pub fn open_db(&self) -> Result<Db> {
        let path = self.resolve_path(&self.config.database.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        self.output.debug(&format!("Database: {}", path.display()));
        Db::open(&path).with_context(|| format!("Failed to open database: {}", path.display()))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}
