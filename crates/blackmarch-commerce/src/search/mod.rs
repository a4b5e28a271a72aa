//! Search module.
//!
//! Filters, the paginated product query used by the catalog API, and its
//! result page.

mod filter;
mod query;
mod results;

pub use filter::Filter;
pub use query::{ProductQuery, DEFAULT_LIMIT, MAX_LIMIT};
pub use results::{Pagination, ProductPage};
