//! Seed command.

use anyhow::Result;
use blackmarch_db::seed::{self, SeedReport};
use serde_json::json;

use super::SeedArgs;
use crate::context::Context;

/// Run the seed command.
pub async fn run(args: SeedArgs, ctx: &Context) -> Result<()> {
    let datasets = args.dataset.datasets();
    let db = ctx.open_db()?;

    let total: usize = datasets.iter().map(|d| d.len()).sum();
    let pb = ctx.output.progress(total as u64, "Seeding");

    let mut report = SeedReport::default();
    for (i, dataset) in datasets.iter().enumerate() {
        pb.set_message(format!("[{}/{}] {}", i + 1, datasets.len(), dataset));
        let applied = seed::run(&db, *dataset, |_| pb.inc(1))?;
        report.categories += applied.categories;
        report.products += applied.products;
        report.images += applied.images;
    }
    pb.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "datasets": datasets.iter().map(|d| d.name()).collect::<Vec<_>>(),
            "categories": report.categories,
            "products": report.products,
            "images": report.images,
        }));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Seeded {} categories, {} products, {} cover images",
        report.categories, report.products, report.images
    ));
    ctx.output.kv("Catalog size", &db.products().count()?.to_string());

    Ok(())
}
