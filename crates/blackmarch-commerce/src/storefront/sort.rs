use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Storefront sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Newest first (by id, which is time-ordered).
    #[default]
    Newest,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Name A-Z.
    NameAsc,
    /// Artist A-Z.
    ArtistAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Newest,
        SortOrder::PriceLow,
        SortOrder::PriceHigh,
        SortOrder::NameAsc,
        SortOrder::ArtistAsc,
    ];

    /// Query-string key (e.g., "price-low").
    pub fn key(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::NameAsc => "name-asc",
            SortOrder::ArtistAsc => "artist-asc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::PriceLow => "Price: Low to High",
            SortOrder::PriceHigh => "Price: High to Low",
            SortOrder::NameAsc => "Name: A-Z",
            SortOrder::ArtistAsc => "Artist: A-Z",
        }
    }

    /// Parse a query-string key. Unknown keys sort newest first.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.key().eq_ignore_ascii_case(key))
            .unwrap_or_default()
    }

    /// Sort in place. The sort is stable.
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            SortOrder::Newest => products.sort_by(|a, b| b.id.cmp(&a.id)),
            SortOrder::PriceLow => products.sort_by_key(|p| p.price.amount_minor),
            SortOrder::PriceHigh => {
                products.sort_by(|a, b| b.price.amount_minor.cmp(&a.price.amount_minor))
            }
            SortOrder::NameAsc => products.sort_by(|a, b| text_cmp(&a.name, &b.name)),
            SortOrder::ArtistAsc => products.sort_by(|a, b| text_cmp(&a.artist, &b.artist)),
        }
    }
}

fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
