//! CLI command implementations.

pub mod config;
pub mod products;
pub mod seed;
pub mod serve;

use blackmarch_db::seed::Dataset;
use clap::{Args, Subcommand};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`).
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the seed command.
#[derive(Args)]
pub struct SeedArgs {
    /// Dataset to load: base, extras, images, covers or all.
    #[arg(default_value = "all", value_parser = parse_datasets)]
    pub dataset: DatasetSelection,
}

/// One dataset or every dataset in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSelection {
    All,
    One(Dataset),
}

impl DatasetSelection {
    pub fn datasets(&self) -> Vec<Dataset> {
        match self {
            Self::All => Dataset::ALL.to_vec(),
            Self::One(dataset) => vec![*dataset],
        }
    }
}

fn parse_datasets(value: &str) -> Result<DatasetSelection, String> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(DatasetSelection::All);
    }
    Dataset::from_name(value)
        .map(DatasetSelection::One)
        .ok_or_else(|| format!("unknown dataset '{}'", value))
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products, newest first.
    List {
        /// Only products in this format (e.g. vinyl, CD).
        #[arg(short, long)]
        format: Option<String>,

        /// Match name, artist or genre.
        #[arg(short, long)]
        search: Option<String>,

        /// Page to show.
        #[arg(long, default_value_t = 1)]
        page: i64,

        /// Products per page (max 100).
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Get a config value, e.g. `store.page_size`.
    Get {
        /// Dotted key.
        key: String,
    },
    /// Write a default blackmarch.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Check the configuration for errors.
    Validate,
}
