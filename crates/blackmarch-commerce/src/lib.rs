//! Domain types and logic for the Blackmarch record store.
//!
//! - **Catalog**: Products, formats, category tags, product payloads
//! - **Search**: Filters and the paginated catalog query
//! - **Storefront**: In-memory search, filter, sort and pagination
//! - **Cart**: Cart lines and totals
//! - **Checkout**: WhatsApp order links
//!
//! # Example
//!
//! ```rust,ignore
//! use blackmarch_commerce::prelude::*;
//!
//! let draft = ProductInput {
//!     name: "Transilvanian Hunger".into(),
//!     artist: "Darkthrone".into(),
//!     format: "vinyl".into(),
//!     genre: "Black Metal".into(),
//!     price: Some(45.0.into()),
//!     ..Default::default()
//! }
//! .validate()?;
//! let product = Product::from_draft(draft, chrono::Utc::now());
//!
//! let mut cart = Cart::new();
//! cart.add_product(&product, 1)?;
//!
//! let number = WhatsAppNumber::parse("+62 812 3456 7890")?;
//! let link = number.cart_link("Blackmarch", &cart)?;
//! println!("{}", link.url);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;
pub mod storefront;

pub use error::{CommerceError, FieldError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, FieldError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Category, CategoryType, FormatKind, Product, ProductDraft, ProductFormat, ProductInput,
    };

    // Cart
    pub use crate::cart::{Cart, LineItem};

    // Checkout
    pub use crate::checkout::{WhatsAppLink, WhatsAppNumber};

    // Search
    pub use crate::search::{Filter, Pagination, ProductPage, ProductQuery};

    // Storefront
    pub use crate::storefront::{browse, BrowseOptions, BrowsePage, SortOrder};
}
