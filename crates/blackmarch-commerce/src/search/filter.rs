//! Catalog list filters.

use serde::{Deserialize, Serialize};

/// A filter on the product list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Exact match on the stored (upper-case) format.
    Format(String),
    /// Exact match on genre.
    Genre(String),
    /// Case-insensitive substring search in name, artist or description.
    Text(String),
}

impl Filter {
    /// Create a format filter. The value is upper-cased.
    pub fn format(format: impl AsRef<str>) -> Self {
        Filter::Format(format.as_ref().trim().to_uppercase())
    }

    /// Create a genre filter.
    pub fn genre(genre: impl Into<String>) -> Self {
        Filter::Genre(genre.into())
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Build SQL WHERE clause component.
    pub fn to_sql(&self) -> (String, Vec<String>) {
        match self {
            Filter::Format(format) => ("format = ?".to_string(), vec![format.clone()]),
            Filter::Genre(genre) => ("genre = ?".to_string(), vec![genre.clone()]),
            Filter::Text(query) => {
                let pattern = format!("%{}%", escape_like(query));
                (
                    "name LIKE ? ESCAPE '\\' OR artist LIKE ? ESCAPE '\\' \
                     OR description LIKE ? ESCAPE '\\'"
                        .to_string(),
                    vec![pattern.clone(), pattern.clone(), pattern],
                )
            }
        }
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_filter_upper_cases() {
        let (sql, values) = Filter::format("vinyl").to_sql();
        assert_eq!(sql, "format = ?");
        assert_eq!(values, vec!["VINYL"]);
    }

    #[test]
    fn test_text_filter_sql() {
        let (sql, values) = Filter::text("hunger").to_sql();
        assert!(sql.contains("name LIKE ?"));
        assert!(sql.contains("artist LIKE ?"));
        assert!(sql.contains("description LIKE ?"));
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], "%hunger%");
    }

    #[test]
    fn test_text_filter_escapes_wildcards() {
        let (_, values) = Filter::text("100%_raw").to_sql();
        assert_eq!(values[0], "%100\\%\\_raw%");
    }
}
