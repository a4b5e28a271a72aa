//! Storefront browsing.
//!
//! The storefront loads the product list once and then searches, filters,
//! sorts and paginates it in memory.

mod browse;
mod sort;

pub use browse::{browse, BrowseOptions, BrowsePage};
pub use sort::SortOrder;

/// Products shown per storefront page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Genres offered in the storefront genre menu, in menu order.
pub const STOREFRONT_GENRES: [&str; 12] = [
    "Black Metal",
    "Raw Black Metal",
    "Symphonic Black Metal",
    "Ambient Black Metal",
    "Norwegian Black Metal",
    "Swedish Black Metal",
    "Folk Black Metal",
    "Depressive Black Metal",
    "Blackened Death Metal",
    "Viking Metal",
    "Pagan Metal",
    "Merchandise",
];
