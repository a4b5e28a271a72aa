//! Category tags used for filtering.

use crate::error::CommerceError;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a category classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    /// Physical format (Vinyl, CD, Shirt, ...).
    RecordFormat,
    /// Music genre (Black Metal, Viking Metal, ...).
    MusicGenre,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::RecordFormat => "RECORD_FORMAT",
            CategoryType::MusicGenre => "MUSIC_GENRE",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RECORD_FORMAT" => Ok(CategoryType::RecordFormat),
            "MUSIC_GENRE" => Ok(CategoryType::MusicGenre),
            _ => Err(CommerceError::InvalidCategoryType(s.to_string())),
        }
    }
}

/// A category tag. Names are unique across both types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub description: Option<String>,
}

impl Category {
    /// Create a new category with a generated ID.
    pub fn new(
        name: impl Into<String>,
        category_type: CategoryType,
        description: Option<String>,
    ) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            category_type,
            description,
        }
    }

    pub fn is_genre(&self) -> bool {
        self.category_type == CategoryType::MusicGenre
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_type_parse() {
        assert_eq!(
            "record_format".parse::<CategoryType>().unwrap(),
            CategoryType::RecordFormat
        );
        assert_eq!(
            "MUSIC_GENRE".parse::<CategoryType>().unwrap(),
            CategoryType::MusicGenre
        );
        assert!("LABEL".parse::<CategoryType>().is_err());
    }

    #[test]
    fn test_category_json_uses_type_key() {
        let cat = Category::new("Vinyl", CategoryType::RecordFormat, None);
        let json = serde_json::to_value(&cat).unwrap();
        assert_eq!(json["type"], "RECORD_FORMAT");
        assert_eq!(json["name"], "Vinyl");
        assert!(!cat.is_genre());
    }
}
