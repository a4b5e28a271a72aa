//! Compact cart encoding: `id:qty|id:qty`.
//!
//! Only ids and quantities are kept; prices and stock are re-read from the
//! catalog when the cart is rebuilt.

use crate::cart::{Cart, MAX_QUANTITY_PER_ITEM};
use crate::ids::ProductId;

/// Encode a cart's lines.
pub fn encode_lines(cart: &Cart) -> String {
    cart.items
        .iter()
        .map(|item| format!("{}:{}", item.product_id, item.quantity))
        .collect::<Vec<_>>()
        .join("|")
}

/// Decode lines, skipping malformed entries and clamping quantities to
/// 1..=MAX_QUANTITY_PER_ITEM.
pub fn decode_lines(token: &str) -> Vec<(ProductId, i64)> {
    let mut lines: Vec<(ProductId, i64)> = Vec::new();
    for entry in token.split('|') {
        let Some((id, quantity)) = entry.rsplit_once(':') else {
            continue;
        };
        let id = id.trim();
        let Ok(quantity) = quantity.trim().parse::<i64>() else {
            continue;
        };
        if id.is_empty() || quantity <= 0 || lines.iter().any(|(existing, _)| existing.as_str() == id) {
            continue;
        }
        lines.push((ProductId::new(id), quantity.min(MAX_QUANTITY_PER_ITEM)));
    }
    lines
}
