//! One-shot seed datasets.
//!
//! `Base` creates the category tags and the six launch products, `Extras`
//! adds the second batch of products, and `Images`/`Covers` assign cover
//! art by product name. Product inserts are not deduplicated; category
//! seeding is an upsert and can be repeated.

mod data;

pub use data::{
    ImageUpdate, SeedCategory, SeedProduct, BASE_PRODUCTS, COVER_UPDATES, EXTRA_PRODUCTS,
    IMAGE_UPDATES, MUSIC_GENRES, RECORD_FORMATS,
};

use crate::{Db, DbError};
use blackmarch_commerce::catalog::{
    NumberOrText, Product, ProductInput, LEGACY_PLACEHOLDER_IMAGE,
};
use blackmarch_commerce::{Money, ProductId};
use chrono::Utc;
use std::fmt;

/// A seed dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Base,
    Extras,
    Images,
    Covers,
}

impl Dataset {
    /// Datasets in the order `all` runs them.
    pub const ALL: [Dataset; 4] = [
        Dataset::Base,
        Dataset::Extras,
        Dataset::Images,
        Dataset::Covers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Base => "base",
            Dataset::Extras => "extras",
            Dataset::Images => "images",
            Dataset::Covers => "covers",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Number of records the dataset writes.
    pub fn len(&self) -> usize {
        match self {
            Dataset::Base => RECORD_FORMATS.len() + MUSIC_GENRES.len() + BASE_PRODUCTS.len(),
            Dataset::Extras => EXTRA_PRODUCTS.len(),
            Dataset::Images => IMAGE_UPDATES.len(),
            Dataset::Covers => COVER_UPDATES.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a dataset run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
    /// Product rows whose image was changed.
    pub images: usize,
}

impl SeedReport {
    fn merge(&mut self, other: SeedReport) {
        self.categories += other.categories;
        self.products += other.products;
        self.images += other.images;
    }
}

impl SeedProduct {
    /// The product as an admin/API payload.
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.to_string(),
            artist: self.artist.to_string(),
            format: self.format.as_str().to_string(),
            genre: self.genre.to_string(),
            subgenre: Some(self.subgenre.to_string()),
            price: Some(NumberOrText::Number(self.price)),
            image: None,
            description: Some(self.description.to_string()),
            in_stock: Some(self.in_stock),
            year: self.year.map(|y| NumberOrText::Number(f64::from(y))),
            label: self.label.map(str::to_string),
            limited: Some(self.limited),
        }
    }
}

/// Run one dataset. `on_record` is called with a short label after each
/// record is written.
pub fn run<F>(db: &Db, dataset: Dataset, mut on_record: F) -> Result<SeedReport, DbError>
where
    F: FnMut(&str),
{
    let mut report = SeedReport::default();

    match dataset {
        Dataset::Base => {
            let categories = db.categories();
            for category in RECORD_FORMATS.iter().chain(MUSIC_GENRES.iter()) {
                categories.upsert_by_name(
                    category.name,
                    category.category_type,
                    Some(category.description),
                )?;
                report.categories += 1;
                on_record(category.name);
            }
            report.products += insert_products(db, &BASE_PRODUCTS, &mut on_record)?;
        }
        Dataset::Extras => {
            report.products += insert_products(db, &EXTRA_PRODUCTS, &mut on_record)?;
        }
        Dataset::Images => {
            report.images += update_images(db, &IMAGE_UPDATES, &mut on_record)?;
        }
        Dataset::Covers => {
            report.images += update_images(db, &COVER_UPDATES, &mut on_record)?;
        }
    }

    tracing::info!(
        dataset = %dataset,
        categories = report.categories,
        products = report.products,
        images = report.images,
        "Seed dataset applied"
    );
    Ok(report)
}

/// Run every dataset in order.
pub fn run_all<F>(db: &Db, mut on_record: F) -> Result<SeedReport, DbError>
where
    F: FnMut(&str),
{
    let mut report = SeedReport::default();
    for dataset in Dataset::ALL {
        report.merge(run(db, dataset, &mut on_record)?);
    }
    Ok(report)
}

fn insert_products<F>(db: &Db, products: &[SeedProduct], on_record: &mut F) -> Result<usize, DbError>
where
    F: FnMut(&str),
{
    let store = db.products();
    for product in products {
        store.create(product.to_input())?;
        on_record(product.name);
    }
    Ok(products.len())
}

fn update_images<F>(db: &Db, updates: &[ImageUpdate], on_record: &mut F) -> Result<usize, DbError>
where
    F: FnMut(&str),
{
    let store = db.products();
    let mut changed = 0;
    for update in updates {
        let rows = store.set_image_by_name(update.name, update.image)?;
        if rows == 0 {
            tracing::debug!(name = update.name, "No product to update");
        }
        changed += rows;
        on_record(update.name);
    }
    Ok(changed)
}

/// Built-in catalog the storefront shows when the store cannot be read:
/// the launch products with ids "1" to "6" and the legacy placeholder image.
pub fn sample_catalog() -> Vec<Product> {
    let now = Utc::now();
    BASE_PRODUCTS
        .iter()
        .enumerate()
        .map(|(i, seed)| Product {
            id: ProductId::new((i + 1).to_string()),
            name: seed.name.to_string(),
            artist: seed.artist.to_string(),
            format: seed.format,
            genre: seed.genre.to_string(),
            subgenre: Some(seed.subgenre.to_string()),
            price: Money::from_decimal(seed.price, blackmarch_commerce::Currency::USD),
            image: Some(LEGACY_PLACEHOLDER_IMAGE.to_string()),
            description: Some(seed.description.to_string()),
            in_stock: seed.in_stock,
            year: seed.year,
            label: seed.label.map(str::to_string),
            limited: seed.limited,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackmarch_commerce::catalog::{CategoryType, DEFAULT_COVER_IMAGE};

    #[test]
    fn test_every_seed_product_validates() {
        for seed in BASE_PRODUCTS.iter().chain(EXTRA_PRODUCTS.iter()) {
            assert!(seed.to_input().validate().is_ok(), "{} failed", seed.name);
        }
    }

    #[test]
    fn test_base_dataset() {
        let db = Db::open_in_memory().unwrap();
        let mut labels = Vec::new();
        let report = run(&db, Dataset::Base, |label| labels.push(label.to_string())).unwrap();

        assert_eq!(report.categories, 19);
        assert_eq!(report.products, 6);
        assert_eq!(labels.len(), Dataset::Base.len());
        assert_eq!(db.categories().list(Some(CategoryType::MusicGenre)).unwrap().len(), 13);
        assert_eq!(db.categories().list(Some(CategoryType::RecordFormat)).unwrap().len(), 6);
        assert_eq!(db.products().count().unwrap(), 6);
    }

    #[test]
    fn test_base_categories_are_idempotent_products_are_not() {
        let db = Db::open_in_memory().unwrap();
        run(&db, Dataset::Base, |_| {}).unwrap();
        run(&db, Dataset::Base, |_| {}).unwrap();
        assert_eq!(db.categories().list(None).unwrap().len(), 19);
        assert_eq!(db.products().count().unwrap(), 12);
    }

    #[test]
    fn test_run_all_assigns_covers() {
        let db = Db::open_in_memory().unwrap();
        let report = run_all(&db, |_| {}).unwrap();
        assert_eq!(report.products, 18);

        let products = db.products().list_all().unwrap();
        assert_eq!(products.len(), 18);
        assert!(products.iter().all(|p| p.image.is_some()));

        let bergtatt = products.iter().find(|p| p.name == "Bergtatt").unwrap();
        assert_eq!(bergtatt.image.as_deref(), Some("/covers/ulver-bergtatt.jpg"));

        let filosofem: Vec<_> = products.iter().filter(|p| p.name == "Filosofem").collect();
        assert_eq!(filosofem.len(), 2);
        assert!(filosofem
            .iter()
            .all(|p| p.image.as_deref() == Some("/covers/burzum-filosofem.jpg")));
    }

    #[test]
    fn test_image_updates_without_products_change_nothing() {
        let db = Db::open_in_memory().unwrap();
        let report = run(&db, Dataset::Covers, |_| {}).unwrap();
        assert_eq!(report.images, 0);
    }

    #[test]
    fn test_sample_catalog() {
        let products = sample_catalog();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
        assert!(products.iter().all(|p| p.display_image() == DEFAULT_COVER_IMAGE));
        assert!(!products[3].in_stock);
    }

    #[test]
    fn test_dataset_names() {
        assert_eq!(Dataset::from_name("COVERS"), Some(Dataset::Covers));
        assert_eq!(Dataset::from_name("everything"), None);
        assert_eq!(Dataset::Extras.len(), 12);
    }
}
