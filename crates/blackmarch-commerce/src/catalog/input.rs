//! Product payloads submitted by the admin dashboard and the API.

use crate::catalog::{Product, ProductFormat};
use crate::error::{CommerceError, FieldError};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Highest accepted price in USD.
pub const MAX_PRICE: f64 = 1_000_000.0;

/// A JSON value that may arrive as a number or as the text of a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, NumberOrText::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for NumberOrText {
    fn from(value: f64) -> Self {
        NumberOrText::Number(value)
    }
}

impl From<&str> for NumberOrText {
    fn from(value: &str) -> Self {
        NumberOrText::Text(value.to_string())
    }
}

/// Unvalidated product payload.
///
/// Optional text fields treat empty strings as absent. `inStock` defaults to
/// true and `limited` to false when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub subgenre: Option<String>,
    #[serde(default)]
    pub price: Option<NumberOrText>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub year: Option<NumberOrText>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub limited: Option<bool>,
}

/// A validated product payload, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub artist: String,
    pub format: ProductFormat,
    pub genre: String,
    pub subgenre: Option<String>,
    pub price: Money,
    pub image: Option<String>,
    pub description: Option<String>,
    pub in_stock: bool,
    pub year: Option<i32>,
    pub label: Option<String>,
    pub limited: bool,
}

impl ProductInput {
    /// Prefill an input from an existing product (admin edit form).
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            artist: product.artist.clone(),
            format: product.format.as_str().to_string(),
            genre: product.genre.clone(),
            subgenre: product.subgenre.clone(),
            price: Some(NumberOrText::Text(product.price.display_amount())),
            image: product.image.clone(),
            description: product.description.clone(),
            in_stock: Some(product.in_stock),
            year: product.year.map(|y| NumberOrText::Number(f64::from(y))),
            label: product.label.clone(),
            limited: Some(product.limited),
        }
    }

    /// Price as text for a form field.
    pub fn price_text(&self) -> String {
        number_text(self.price.as_ref())
    }

    /// Year as text for a form field.
    pub fn year_text(&self) -> String {
        number_text(self.year.as_ref())
    }

    /// Validate every field, collecting all failures.
    pub fn validate(self) -> Result<ProductDraft, CommerceError> {
        let mut errors = Vec::new();

        let name = required(&mut errors, "name", self.name);
        let artist = required(&mut errors, "artist", self.artist);
        let genre = required(&mut errors, "genre", self.genre);

        let format = if self.format.trim().is_empty() {
            errors.push(FieldError::new("format", "is required"));
            None
        } else {
            match ProductFormat::parse(&self.format) {
                Some(format) => Some(format),
                None => {
                    errors.push(FieldError::new(
                        "format",
                        format!("unknown format '{}'", self.format.trim()),
                    ));
                    None
                }
            }
        };

        let price = match self.price.as_ref().filter(|p| !p.is_blank()) {
            None => {
                errors.push(FieldError::new("price", "is required"));
                None
            }
            Some(raw) => match raw.as_f64() {
                Some(value) if value.is_finite() && (0.0..=MAX_PRICE).contains(&value) => {
                    Some(Money::from_decimal(value, Currency::USD))
                }
                Some(value) if value > MAX_PRICE => {
                    errors.push(FieldError::new(
                        "price",
                        format!("must be at most {}", MAX_PRICE),
                    ));
                    None
                }
                Some(_) => {
                    errors.push(FieldError::new("price", "must be zero or more"));
                    None
                }
                None => {
                    errors.push(FieldError::new("price", "must be a number"));
                    None
                }
            },
        };

        let year = match self.year.as_ref().filter(|y| !y.is_blank()) {
            None => None,
            Some(raw) => match raw.as_f64() {
                Some(value) if value.fract() == 0.0 && (1.0..=9999.0).contains(&value) => {
                    Some(value as i32)
                }
                _ => {
                    errors.push(FieldError::new("year", "must be a whole year between 1 and 9999"));
                    None
                }
            },
        };

        match (name, artist, genre, format, price) {
            (Some(name), Some(artist), Some(genre), Some(format), Some(price))
                if errors.is_empty() =>
            {
                Ok(ProductDraft {
                    name,
                    artist,
                    format,
                    genre,
                    subgenre: optional(self.subgenre),
                    price,
                    image: optional(self.image),
                    description: optional(self.description),
                    in_stock: self.in_stock.unwrap_or(true),
                    year,
                    label: optional(self.label),
                    limited: self.limited.unwrap_or(false),
                })
            }
            _ => Err(CommerceError::Validation(errors)),
        }
    }
}

fn required(errors: &mut Vec<FieldError>, field: &'static str, value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, "is required"));
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn number_text(value: Option<&NumberOrText>) -> String {
    match value {
        None => String::new(),
        Some(NumberOrText::Text(s)) => s.clone(),
        Some(NumberOrText::Number(n)) if n.fract() == 0.0 => format!("{}", *n as i64),
        Some(NumberOrText::Number(n)) => n.to_string(),
    }
}
