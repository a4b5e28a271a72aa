//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use blackmarch_commerce::checkout::WhatsAppNumber;
use blackmarch_server::config::{generate_default_config, CONFIG_FILE_NAMES};
use blackmarch_server::AppConfig;
use serde_json::Value;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let Value::Object(sections) = serde_json::to_value(&ctx.config)? else {
        bail!("Configuration did not serialize to a table");
    };
    for (name, section) in &sections {
        ctx.output.section(name);
        if let Value::Object(fields) = section {
            for (key, value) in fields {
                ctx.output.kv(key, &display_value(value));
            }
        }
    }

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", display_value(&value));
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(ctx);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Errors and warnings for the effective configuration.
fn check_config(ctx: &Context) -> (Vec<String>, Vec<String>) {
    let config = &ctx.config;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.server.port == 0 {
        errors.push("server.port must be between 1 and 65535".to_string());
    }
    if config.store.name.trim().is_empty() {
        errors.push("store.name is required".to_string());
    }
    if let Err(e) = WhatsAppNumber::parse(&config.store.whatsapp_number) {
        errors.push(format!("store.whatsapp_number: {}", e));
    }
    if config.store.page_size == 0 {
        errors.push("store.page_size must be at least 1".to_string());
    }
    if !(config.store.idr_exchange_rate.is_finite() && config.store.idr_exchange_rate > 0.0) {
        errors.push("store.idr_exchange_rate must be a positive number".to_string());
    }

    if !ctx.resolve_path(&config.server.public_dir).is_dir() {
        warnings.push(format!(
            "server.public_dir '{}' does not exist; cover images will 404",
            config.server.public_dir
        ));
    }
    if !ctx.resolve_path(&config.database.path).exists() {
        warnings.push(format!(
            "database.path '{}' does not exist yet; it is created on first use",
            config.database.path
        ));
    }

    (errors, warnings)
}

/// Look up a dotted key such as `store.page_size`.
fn get_config_value(config: &AppConfig, key: &str) -> Result<Value> {
    let pointer = format!("/{}", key.trim().replace('.', "/"));
    serde_json::to_value(config)?
        .pointer(&pointer)
        .cloned()
        .with_context(|| format!("Unknown config key: {}", key))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
