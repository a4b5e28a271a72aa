//! Product catalog commands.

use anyhow::{bail, Result};
use blackmarch_commerce::search::ProductQuery;
use blackmarch_commerce::ProductId;
use dialoguer::Confirm;

use super::{ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::stock_badge;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List {
            format,
            search,
            page,
            limit,
        } => list_products(format, search, page, limit, ctx).await,
        ProductsCommand::Delete { id, yes } => delete_product(&id, yes, ctx).await,
    }
}

async fn list_products(
    format: Option<String>,
    search: Option<String>,
    page: i64,
    limit: i64,
    ctx: &Context,
) -> Result<()> {
    let mut query = ProductQuery::new().with_pagination(page, limit);
    if let Some(format) = format.as_deref() {
        query = query.with_format(format);
    }
    if let Some(search) = search.as_deref() {
        query = query.with_search(search);
    }

    let db = ctx.open_db()?;
    let result = db.products().list(&query)?;

    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    if result.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    ctx.output.header("Products");

    let widths = [36, 22, 28, 10, 9];
    ctx.output
        .table_row(&["ID", "ARTIST", "NAME", "FORMAT", "PRICE"], &widths);
    ctx.output.table_row(
        &["──", "──────", "────", "──────", "─────"],
        &widths,
    );

    for product in &result.products {
        let price = product.price.display();
        let row = [
            product.id.as_str(),
            product.artist.as_str(),
            product.name.as_str(),
            product.format.label(),
            price.as_str(),
        ];
        ctx.output.table_row(&row, &widths);
        if !product.in_stock || product.limited {
            let mut notes = vec![stock_badge(product.in_stock)];
            if product.limited {
                notes.push("limited".to_string());
            }
            ctx.output.kv("", &notes.join(", "));
        }
    }

    let pagination = &result.pagination;
    ctx.output.info(&format!(
        "Page {} of {} ({} products)",
        pagination.page, pagination.pages, pagination.total
    ));

    Ok(())
}

async fn delete_product(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let id = ProductId::new(id.trim());
    let db = ctx.open_db()?;

    let Some(product) = db.products().get(&id)? else {
        bail!("Product not found: {}", id);
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", product.title()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Delete cancelled");
            return Ok(());
        }
    }

    db.products().delete(&id)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id }));
    } else {
        ctx.output.success(&format!("Deleted {}", product.title()));
    }

    Ok(())
}
