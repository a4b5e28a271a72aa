//! Product catalog module.
//!
//! Contains products, their formats, category tags and the payloads used to
//! create or edit products.

mod category;
mod input;
mod product;

pub use category::{Category, CategoryType};
pub use input::{NumberOrText, ProductDraft, ProductInput};
pub use product::{
    FormatKind, Product, ProductFormat, DEFAULT_COVER_IMAGE, LEGACY_PLACEHOLDER_IMAGE,
};
