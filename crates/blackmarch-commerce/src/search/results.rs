//! Search results and pagination.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Pagination info, as returned by the catalog API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub limit: i64,
    /// Total number of matching items.
    pub total: i64,
    /// Total number of pages; zero when nothing matched.
    pub pages: i64,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        let total = total.max(0);
        Self {
            page,
            limit,
            total,
            pages: (total + limit - 1) / limit,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether page links are worth showing.
    pub fn is_multi_page(&self) -> bool {
        self.pages > 1
    }

    /// Get page numbers for display (e.g., [1, 2, 3, ..., 10]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<i64> {
        if self.pages as usize <= max_visible {
            return (1..=self.pages).collect();
        }

        let half = max_visible / 2;
        let start = (self.page - half as i64).max(1);
        let end = (start + max_visible as i64 - 1).min(self.pages);
        let start = (end - max_visible as i64 + 1).max(1);

        (start..=end).collect()
    }
}

/// One page of the product list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, pagination: Pagination) -> Self {
        Self {
            products,
            pagination,
        }
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.pages, 5);
        assert!(p.has_next());
        assert!(p.has_prev());
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45);
        assert!(p.has_prev());
        assert!(!p.has_next());
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.pages, 0);
        assert!(!p.has_next());
        assert!(!p.is_multi_page());
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let p = Pagination::new(1, 12, 16);
        assert_eq!(p.page_numbers(5), vec![1, 2]);
    }

    #[test]
    fn test_pagination_json_shape() {
        let json = serde_json::to_value(Pagination::new(1, 20, 16)).unwrap();
        assert_eq!(json, serde_json::json!({"page": 1, "limit": 20, "total": 16, "pages": 1}));
    }
}
