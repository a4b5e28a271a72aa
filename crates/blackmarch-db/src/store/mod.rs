//! Typed access to the catalog tables.

mod categories;
mod products;

pub use categories::CategoryStore;
pub use products::ProductStore;
