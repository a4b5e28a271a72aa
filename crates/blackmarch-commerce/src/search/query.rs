//! Product list query builder.

use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Default page size of the catalog API.
pub const DEFAULT_LIMIT: i64 = 20;

/// Largest page size the catalog API will return.
pub const MAX_LIMIT: i64 = 100;

/// Newest first. Ties fall back to id, which is time-ordered too.
const ORDER_BY: &str = "created_at DESC, id DESC";

/// A filtered, paginated product list query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductQuery {
    /// Filters to apply (AND).
    pub filters: Vec<Filter>,
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub limit: i64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    /// Create a new query for the first page.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Build a query from raw request parameters.
    ///
    /// `all` and empty values mean "no filter". Page and limit that do not
    /// parse fall back to their defaults.
    pub fn from_params(
        format: Option<&str>,
        genre: Option<&str>,
        search: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Self {
        let page = page.and_then(|p| p.trim().parse().ok()).unwrap_or(1);
        let limit = limit
            .and_then(|l| l.trim().parse().ok())
            .unwrap_or(DEFAULT_LIMIT);

        let mut query = Self::new().with_pagination(page, limit);
        if let Some(format) = format {
            query = query.with_format(format);
        }
        if let Some(genre) = genre {
            query = query.with_genre(genre);
        }
        if let Some(search) = search {
            query = query.with_search(search);
        }
        query
    }

    /// Filter by format unless the value is empty or `all`.
    pub fn with_format(mut self, format: &str) -> Self {
        if is_set(format) {
            self.filters.push(Filter::format(format));
        }
        self
    }

    /// Filter by genre unless the value is empty or `all`.
    pub fn with_genre(mut self, genre: &str) -> Self {
        if is_set(genre) {
            self.filters.push(Filter::genre(genre));
        }
        self
    }

    /// Add a text search unless the term is blank.
    pub fn with_search(mut self, search: &str) -> Self {
        if !search.trim().is_empty() {
            self.filters.push(Filter::text(search));
        }
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: i64, limit: i64) -> Self {
        self.page = page.max(1);
        self.limit = limit.clamp(1, MAX_LIMIT);
        self
    }

    /// Calculate offset for SQL LIMIT/OFFSET.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Build SQL WHERE clause from filters.
    pub fn build_where_clause(&self) -> (String, Vec<String>) {
        if self.filters.is_empty() {
            return ("1=1".to_string(), vec![]);
        }

        let mut clauses = Vec::new();
        let mut all_values = Vec::new();

        for filter in &self.filters {
            let (clause, values) = filter.to_sql();
            clauses.push(format!("({})", clause));
            all_values.extend(values);
        }

        (clauses.join(" AND "), all_values)
    }

    /// Build full SQL query for products.
    pub fn build_sql(&self) -> (String, Vec<String>) {
        let (where_clause, values) = self.build_where_clause();

        let sql = format!(
            "SELECT * FROM products WHERE {} ORDER BY {} LIMIT {} OFFSET {}",
            where_clause,
            ORDER_BY,
            self.limit,
            self.offset()
        );

        (sql, values)
    }

    /// Build count SQL query.
    pub fn build_count_sql(&self) -> (String, Vec<String>) {
        let (where_clause, values) = self.build_where_clause();
        let sql = format!("SELECT COUNT(*) as count FROM products WHERE {}", where_clause);
        (sql, values)
    }
}

fn is_set(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.eq_ignore_ascii_case("all")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = ProductQuery::new()
            .with_search("burzum")
            .with_format("cd")
            .with_pagination(2, 10);

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset(), 10);
        assert_eq!(query.filters.len(), 2);
    }

    #[test]
    fn test_all_and_blank_are_ignored() {
        let query = ProductQuery::new()
            .with_format("all")
            .with_genre("ALL")
            .with_search("   ");
        assert!(query.filters.is_empty());
        assert_eq!(query.build_where_clause().0, "1=1");
    }

    #[test]
    fn test_pagination_is_clamped() {
        let query = ProductQuery::new().with_pagination(0, 1000);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, MAX_LIMIT);

        let query = ProductQuery::new().with_pagination(-3, 0);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 1);
    }

    #[test]
    fn test_from_params_defaults() {
        let query = ProductQuery::from_params(None, None, None, Some("abc"), Some(""));
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_LIMIT);

        let query = ProductQuery::from_params(
            Some("vinyl"),
            Some("Black Metal"),
            Some("hunger"),
            Some("3"),
            Some("5"),
        );
        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 5);
        assert_eq!(
            query.filters,
            vec![
                Filter::Format("VINYL".to_string()),
                Filter::Genre("Black Metal".to_string()),
                Filter::Text("hunger".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_sql() {
        let query = ProductQuery::new()
            .with_genre("Black Metal")
            .with_pagination(1, 20);

        let (sql, values) = query.build_sql();
        assert!(sql.contains("SELECT * FROM products"));
        assert!(sql.contains("(genre = ?)"));
        assert!(sql.contains("ORDER BY created_at DESC, id DESC"));
        assert!(sql.contains("LIMIT 20 OFFSET 0"));
        assert_eq!(values, vec!["Black Metal"]);
    }

    #[test]
    fn test_count_sql_ignores_pagination() {
        let query = ProductQuery::new().with_format("CD").with_pagination(4, 10);
        let (sql, values) = query.build_count_sql();
        assert_eq!(sql, "SELECT COUNT(*) as count FROM products WHERE (format = ?)");
        assert_eq!(values, vec!["CD"]);
    }
}
