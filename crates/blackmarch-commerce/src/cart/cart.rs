//! Cart and line item types.

use crate::catalog::{Product, ProductFormat};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 99;

/// A shopping cart. Lines are keyed by product; prices are in USD.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart, in the order they were first added.
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the cart.
    ///
    /// Returns an error if:
    /// - The product is out of stock
    /// - Quantity is not positive
    /// - Adding would exceed MAX_QUANTITY_PER_ITEM
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !product.is_available() {
            return Err(CommerceError::OutOfStock(product.title()));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            return existing.update_total();
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        self.items.push(LineItem::new(product, quantity)?);
        Ok(())
    }

    /// Update item quantity.
    ///
    /// If quantity is <= 0, removes the item.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                item.update_total()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.items.iter().map(|i| &i.total_price), Currency::USD)
            .ok_or(CommerceError::Overflow)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    /// "Artist - Name" (denormalized for display).
    pub title: String,
    pub format: ProductFormat,
    pub quantity: i64,
    pub unit_price: Money,
    /// unit_price * quantity.
    pub total_price: Money,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(product: &Product, quantity: i64) -> Result<Self, CommerceError> {
        let total_price = product
            .price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            product_id: product.id.clone(),
            title: product.title(),
            format: product.format,
            quantity,
            unit_price: product.price,
            total_price,
        })
    }

    /// Update the total price based on quantity.
    pub fn update_total(&mut self) -> Result<(), CommerceError> {
        self.total_price = self
            .unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDraft;
    use chrono::Utc;

    fn product(id: &str, cents: i64, in_stock: bool) -> Product {
        let mut p = Product::from_draft(
            ProductDraft {
                name: "Under a Funeral Moon".to_string(),
                artist: "Darkthrone".to_string(),
                format: ProductFormat::Cd,
                genre: "Black Metal".to_string(),
                subgenre: None,
                price: Money::usd_cents(cents),
                image: None,
                description: None,
                in_stock,
                year: None,
                label: None,
                limited: false,
            },
            Utc::now(),
        );
        p.id = ProductId::new(id);
        p
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000, true), 2).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_item_count(), 1);
        let line = cart.get_item(&ProductId::new("1")).unwrap();
        assert_eq!(line.title, "Darkthrone - Under a Funeral Moon");
        assert_eq!(line.total_price, Money::usd_cents(2000));
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let p = product("1", 1000, true);
        cart.add_product(&p, 1).unwrap();
        cart.add_product(&p, 2).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_out_of_stock_is_rejected() {
        let mut cart = Cart::new();
        let err = cart.add_product(&product("1", 1000, false), 1).unwrap_err();
        assert!(matches!(err, CommerceError::OutOfStock(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let mut cart = Cart::new();
        let id = ProductId::new("1");
        cart.add_product(&product("1", 1000, true), 1).unwrap();

        assert!(cart.update_quantity(&id, 5).unwrap());
        assert_eq!(cart.item_count(), 5);
        assert!(!cart.update_quantity(&ProductId::new("9"), 1).unwrap());

        assert!(cart.update_quantity(&id, 0).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000, true), 2).unwrap();
        cart.add_product(&product("2", 2000, true), 1).unwrap();
        assert_eq!(cart.total().unwrap(), Money::usd_cents(4000));

        cart.clear();
        assert_eq!(cart.total().unwrap(), Money::usd_cents(0));
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        let p = product("1", 1000, true);
        assert!(cart.add_product(&p, MAX_QUANTITY_PER_ITEM + 1).is_err());

        cart.add_product(&p, MAX_QUANTITY_PER_ITEM).unwrap();
        let err = cart.add_product(&p, 1).unwrap_err();
        assert!(matches!(err, CommerceError::QuantityExceedsLimit(100, 99)));
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new();
        let result = cart.add_product(&product("1", 1000, true), 0);
        assert!(matches!(result, Err(CommerceError::InvalidQuantity(0))));
    }
}
