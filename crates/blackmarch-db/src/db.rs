//! Database connection and query execution.

use crate::store::{CategoryStore, ProductStore};
use crate::{DbError, QueryResult, Row, Value};
use rusqlite::{params_from_iter, Connection};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Embedded catalog schema.
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// SQLite database connection.
///
/// Provides type-safe query execution with automatic result deserialization.
/// The connection is guarded by a mutex so a single `Db` can be shared
/// between request handlers.
pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    /// Open (or create) the database file at `path` and apply the schema.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let db = Db::open("data/blackmarch.db")?;
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DbError::OpenError(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| DbError::OpenError(format!("{}: {}", path.display(), e)))?;
        let db = Self::init(conn)?;

        tracing::debug!(path = %path.display(), "Catalog database opened");
        Ok(db)
    }

    /// Open a private in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::OpenError(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, DbError> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| DbError::OpenError(format!("failed to apply schema: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, DbError> {
        self.conn
            .lock()
            .map_err(|_| DbError::QueryError("connection lock poisoned".to_string()))
    }

    /// Product table access.
    pub fn products(&self) -> ProductStore<'_> {
        ProductStore::new(self)
    }

    /// Category table access.
    pub fn categories(&self) -> CategoryStore<'_> {
        CategoryStore::new(self)
    }

    /// Execute a SQL statement that doesn't return rows.
    ///
    /// Use this for INSERT, UPDATE, DELETE, etc. Returns the number of rows
    /// changed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// db.execute(
    ///     "UPDATE products SET image = ? WHERE name = ?",
    ///     params!["/covers/ulver-bergtatt.jpg", "Bergtatt"]
    /// )?;
    /// ```
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize, DbError> {
        tracing::trace!(sql, "execute");
        let conn = self.conn()?;
        Ok(conn.execute(sql, params_from_iter(params.iter()))?)
    }

    /// Execute a SQL query and return raw results.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let result = db.query("SELECT * FROM products WHERE price_cents < ?", params![5000])?;
    /// for row in result.iter() {
    ///     let name = row.get("name").and_then(|v| v.as_text());
    ///     println!("Product: {:?}", name);
    /// }
    /// ```
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult, DbError> {
        tracing::trace!(sql, "query");
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = Vec::new();
        let mut cursor = stmt.query(params_from_iter(params.iter()))?;
        while let Some(row) = cursor.next()? {
            let values = (0..columns.len())
                .map(|i| row.get_ref(i).map(Value::from))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(Row::new(columns.clone(), values));
        }

        Ok(QueryResult::new(columns, rows))
    }

    /// Execute a SQL query and deserialize results into a vector.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(Deserialize)]
    /// struct Name {
    ///     name: String,
    /// }
    ///
    /// let names: Vec<Name> = db.query_as("SELECT name FROM products", params![])?;
    /// ```
    pub fn query_as<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<T>, DbError> {
        let result = self.query(sql, params)?;
        result.deserialize_all()
    }

    /// Execute a SQL query and return a single row.
    ///
    /// Returns an error if no rows are returned.
    pub fn query_one<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<T, DbError> {
        let result = self.query(sql, params)?;
        result.first().ok_or(DbError::NotFound)?.deserialize()
    }

    /// Execute a SQL query and return an optional single row.
    ///
    /// Returns `None` if no rows are returned.
    pub fn query_optional<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<T>, DbError> {
        let result = self.query(sql, params)?;
        match result.first() {
            Some(row) => Ok(Some(row.deserialize()?)),
            None => Ok(None),
        }
    }
}
