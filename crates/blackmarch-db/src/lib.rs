//! SQLite catalog store for the Blackmarch record store.
//!
//! Wraps a `rusqlite` connection with a small, ergonomic query API and
//! typed stores for products and categories.
//!
//! # Example
//!
//! ```rust,ignore
//! use blackmarch_db::{Db, params};
//! use blackmarch_commerce::search::ProductQuery;
//!
//! let db = Db::open("data/blackmarch.db")?;
//!
//! // Typed stores
//! let page = db.products().list(&ProductQuery::new().with_format("vinyl"))?;
//!
//! // Raw queries
//! db.execute(
//!     "UPDATE products SET in_stock = ? WHERE name = ?",
//!     params![false, "Deathcrush"]
//! )?;
//! ```

mod db;
mod error;
mod store;
mod types;

pub mod seed;

pub use db::Db;
pub use error::DbError;
pub use store::{CategoryStore, ProductStore};
pub use types::{QueryResult, Row, Value};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{params, CategoryStore, Db, DbError, ProductStore, QueryResult, Row, Value};
}

/// Create a parameter list for SQL queries.
///
/// # Example
///
/// ```rust,ignore
/// use blackmarch_db::params;
///
/// let params = params!["Bergtatt", 1995, 20.0];
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::Value::from($param)),+]
    };
}
