//! Serve command.

use anyhow::Result;
use blackmarch_server::{serve, AppState};

use super::ServeArgs;
use crate::context::Context;

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.server.public_dir = ctx
        .resolve_path(&config.server.public_dir)
        .to_string_lossy()
        .into_owned();

    let db = ctx.open_db()?;
    let products = db.products().count()?;
    if products == 0 {
        ctx.output
            .warn("The catalog is empty. Run `blackmarch seed` to load the launch catalog.");
    }

    let state = AppState::new(db, &config)?;
    let addr = config.bind_addr();

    ctx.output.header(&config.store.name);
    ctx.output.kv("Storefront", &format!("http://{}/", addr));
    ctx.output.kv("Admin", &format!("http://{}/admin", addr));
    ctx.output.kv("Products", &products.to_string());

    serve(state, &addr).await
}
