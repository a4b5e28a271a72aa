//! Commerce error types.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single rejected field in a product payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the payload (camelCase).
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur in catalog, cart and checkout operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product cannot be ordered because it is out of stock.
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),

    /// Unknown product format.
    #[error("Invalid product format: {0}")]
    InvalidFormat(String),

    /// Unknown category type.
    #[error("Invalid category type: {0}")]
    InvalidCategoryType(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// WhatsApp number is not usable in a wa.me link.
    #[error("Invalid WhatsApp number: {0}")]
    InvalidPhoneNumber(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Product payload failed validation.
    #[error("Validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
}

impl CommerceError {
    /// Field errors carried by a validation failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CommerceError::Validation(fields) => fields,
            _ => &[],
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
