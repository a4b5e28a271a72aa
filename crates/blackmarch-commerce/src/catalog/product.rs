//! Product and format types.

use crate::catalog::ProductDraft;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image path the first storefront release wrote for every product.
pub const LEGACY_PLACEHOLDER_IMAGE: &str = "/api/placeholder/300/300";

/// Cover shown when a product has no usable image.
pub const DEFAULT_COVER_IMAGE: &str = "/covers/default-album.jpg";

/// Physical format of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ProductFormat {
    Vinyl,
    Cd,
    Cassette,
    Shirt,
    Patch,
    Accessory,
}

/// Whether a format is a music release or merchandise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Music,
    Merch,
}

impl ProductFormat {
    /// All formats in menu order.
    pub const ALL: [ProductFormat; 6] = [
        ProductFormat::Vinyl,
        ProductFormat::Cd,
        ProductFormat::Cassette,
        ProductFormat::Shirt,
        ProductFormat::Patch,
        ProductFormat::Accessory,
    ];

    /// Stored representation (e.g., "VINYL").
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductFormat::Vinyl => "VINYL",
            ProductFormat::Cd => "CD",
            ProductFormat::Cassette => "CASSETTE",
            ProductFormat::Shirt => "SHIRT",
            ProductFormat::Patch => "PATCH",
            ProductFormat::Accessory => "ACCESSORY",
        }
    }

    /// Lower-case key used in storefront URLs (e.g., "vinyl").
    pub fn slug(&self) -> &'static str {
        match self {
            ProductFormat::Vinyl => "vinyl",
            ProductFormat::Cd => "cd",
            ProductFormat::Cassette => "cassette",
            ProductFormat::Shirt => "shirt",
            ProductFormat::Patch => "patch",
            ProductFormat::Accessory => "accessory",
        }
    }

    /// Singular label for forms.
    pub fn label(&self) -> &'static str {
        match self {
            ProductFormat::Vinyl => "Vinyl",
            ProductFormat::Cd => "CD",
            ProductFormat::Cassette => "Cassette",
            ProductFormat::Shirt => "Shirt",
            ProductFormat::Patch => "Patch",
            ProductFormat::Accessory => "Accessory",
        }
    }

    /// Label for the storefront format menu.
    pub fn menu_label(&self) -> &'static str {
        match self {
            ProductFormat::Shirt => "Shirts",
            ProductFormat::Patch => "Patches",
            ProductFormat::Accessory => "Accessories",
            other => other.label(),
        }
    }

    pub fn kind(&self) -> FormatKind {
        match self {
            ProductFormat::Vinyl | ProductFormat::Cd | ProductFormat::Cassette => FormatKind::Music,
            ProductFormat::Shirt | ProductFormat::Patch | ProductFormat::Accessory => FormatKind::Merch,
        }
    }

    /// Parse case-insensitively ("vinyl", "VINYL", " Cd ").
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ProductFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductFormat {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CommerceError::InvalidFormat(s.to_string()))
    }
}

impl TryFrom<String> for ProductFormat {
    type Error = CommerceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProductFormat> for &'static str {
    fn from(format: ProductFormat) -> Self {
        format.as_str()
    }
}

/// A record or merchandise item in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Album or item name.
    pub name: String,
    /// Artist or band.
    pub artist: String,
    pub format: ProductFormat,
    pub genre: String,
    pub subgenre: Option<String>,
    /// Price in USD.
    #[serde(with = "crate::money::usd_decimal")]
    pub price: Money,
    /// Cover image path or URL.
    pub image: Option<String>,
    pub description: Option<String>,
    pub in_stock: bool,
    /// Release year.
    pub year: Option<i32>,
    /// Record label.
    pub label: Option<String>,
    /// Limited pressing or run.
    pub limited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product from a validated draft.
    pub fn from_draft(draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::generate(),
            name: draft.name,
            artist: draft.artist,
            format: draft.format,
            genre: draft.genre,
            subgenre: draft.subgenre,
            price: draft.price,
            image: draft.image,
            description: draft.description,
            in_stock: draft.in_stock,
            year: draft.year,
            label: draft.label,
            limited: draft.limited,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field with the draft's values.
    pub fn apply(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.artist = draft.artist;
        self.format = draft.format;
        self.genre = draft.genre;
        self.subgenre = draft.subgenre;
        self.price = draft.price;
        self.image = draft.image;
        self.description = draft.description;
        self.in_stock = draft.in_stock;
        self.year = draft.year;
        self.label = draft.label;
        self.limited = draft.limited;
        self.updated_at = now;
    }

    /// "Artist - Name", as shown in the cart and order messages.
    pub fn title(&self) -> String {
        format!("{} - {}", self.artist, self.name)
    }

    /// Image to render, falling back to the default cover.
    pub fn display_image(&self) -> &str {
        match self.image.as_deref() {
            Some(image) if !image.is_empty() && image != LEGACY_PLACEHOLDER_IMAGE => image,
            _ => DEFAULT_COVER_IMAGE,
        }
    }

    /// Check if the product can be added to a cart.
    pub fn is_available(&self) -> bool {
        self.in_stock
    }

    pub fn is_music(&self) -> bool {
        self.format.kind() == FormatKind::Music
    }

    /// "1994 • Peaceville Records" style release line, if a year is known.
    pub fn release_line(&self) -> Option<String> {
        self.year.map(|year| match &self.label {
            Some(label) => format!("{} \u{2022} {}", year, label),
            None => year.to_string(),
        })
    }
}
