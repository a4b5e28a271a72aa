//! Blackmarch CLI - run and manage the Blackmarch record store.
//!
//! Commands:
//! - `blackmarch serve` - Serve the storefront, admin and API
//! - `blackmarch seed` - Load the seed datasets
//! - `blackmarch products` - List or delete catalog products
//! - `blackmarch config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use blackmarch_server::telemetry::{self, LogLevel};
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, ProductsArgs, SeedArgs, ServeArgs};

/// Blackmarch - underground metal record store
#[derive(Parser)]
#[command(name = "blackmarch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the storefront, admin dashboard and API
    Serve(ServeArgs),

    /// Load seed datasets into the database
    Seed(SeedArgs),

    /// List or delete catalog products
    Products(ProductsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Logging; `config` only reads and writes files
    if !matches!(cli.command, Commands::Config(_)) {
        let level = if cli.verbose {
            LogLevel::Debug
        } else {
            ctx.config.logging.level
        };
        telemetry::init(level, ctx.config.logging.format)?;
    }

    // Execute command
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run(args, &ctx).await,
        Commands::Seed(args) => commands::seed::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
