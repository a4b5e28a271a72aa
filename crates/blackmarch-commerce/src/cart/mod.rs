//! Shopping cart module.
//!
//! Contains the cart, its line items and the compact token the storefront
//! keeps the cart in between requests.

mod cart;
mod token;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use token::{decode_lines, encode_lines};
