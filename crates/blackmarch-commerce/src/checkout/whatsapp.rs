use crate::cart::Cart;
use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

/// A WhatsApp number in international format, digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WhatsAppNumber(String);

impl WhatsAppNumber {
    /// Parse a phone number, dropping everything but digits
    /// ("+62 812-3456-7890" becomes "6281234567890").
    pub fn parse(raw: &str) -> Result<Self, CommerceError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            return Err(CommerceError::InvalidPhoneNumber(raw.to_string()));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Link that opens a chat with `message` pre-filled.
    pub fn link(&self, message: String) -> WhatsAppLink {
        let url = format!(
            "https://wa.me/{}?text={}",
            self.0,
            urlencoding::encode(&message)
        );
        WhatsAppLink { url, message }
    }

    /// Order link for a single copy of one product.
    pub fn product_link(
        &self,
        store_name: &str,
        product: &Product,
    ) -> Result<WhatsAppLink, CommerceError> {
        let mut cart = Cart::new();
        cart.add_product(product, 1)?;
        self.cart_link(store_name, &cart)
    }

    /// Order link for a whole cart.
    pub fn cart_link(&self, store_name: &str, cart: &Cart) -> Result<WhatsAppLink, CommerceError> {
        Ok(self.link(order_message(store_name, cart)?))
    }
}

impl fmt::Display for WhatsAppNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

impl TryFrom<String> for WhatsAppNumber {
    type Error = CommerceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WhatsAppNumber> for String {
    fn from(number: WhatsAppNumber) -> Self {
        number.0
    }
}

/// A `wa.me` link and the message it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppLink {
    pub url: String,
    pub message: String,
}

fn order_message(store_name: &str, cart: &Cart) -> Result<String, CommerceError> {
    if cart.is_empty() {
        return Err(CommerceError::EmptyCart);
    }

    let mut message = format!("Hello {}! I would like to order:\n", store_name);
    for (i, item) in cart.items.iter().enumerate() {
        message.push_str(&format!(
            "\n{}. {} ({}) x{} - {}",
            i + 1,
            item.title,
            item.format,
            item.quantity,
            item.total_price
        ));
    }
    message.push_str(&format!("\n\nTotal: {}", cart.total()?));
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductDraft, ProductFormat};
    use crate::ids::ProductId;
    use crate::money::Money;
    use chrono::Utc;

    fn product(id: &str, artist: &str, name: &str, cents: i64, in_stock: bool) -> Product {
        let mut p = Product::from_draft(
            ProductDraft {
                name: name.to_string(),
                artist: artist.to_string(),
                format: ProductFormat::Vinyl,
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
    fn test_parse_strips_formatting() {
        let number = WhatsAppNumber::parse("+62 812-3456-7890").unwrap();
        assert_eq!(number.as_str(), "6281234567890");
        assert_eq!(number.to_string(), "+6281234567890");
    }

    #[test]
    fn test_parse_rejects_bad_lengths() {
        assert!(WhatsAppNumber::parse("12345").is_err());
        assert!(WhatsAppNumber::parse("1234567890123456").is_err());
        assert!(WhatsAppNumber::parse("call me").is_err());
    }

    #[test]
    fn test_product_link() {
        let number = WhatsAppNumber::parse("6281234567890").unwrap();
        let link = number
            .product_link("Blackmarch", &product("1", "Darkthrone", "Transilvanian Hunger", 4500, true))
            .unwrap();

        assert_eq!(
            link.message,
            "Hello Blackmarch! I would like to order:\n\n\
             1. Darkthrone - Transilvanian Hunger (VINYL) x1 - $45.00\n\nTotal: $45.00"
        );
        assert!(link.url.starts_with("https://wa.me/6281234567890?text=Hello%20Blackmarch%21"));
        assert!(!link.url.contains(' '));
        assert!(!link.url.contains('\n'));
    }

    #[test]
    fn test_cart_link_lists_every_line() {
        let number = WhatsAppNumber::parse("6281234567890").unwrap();
        let mut cart = Cart::new();
        cart.add_product(&product("1", "Darkthrone", "Transilvanian Hunger", 4500, true), 1)
            .unwrap();
        cart.add_product(&product("2", "Burzum", "Filosofem", 1500, true), 2)
            .unwrap();

        let link = number.cart_link("Blackmarch", &cart).unwrap();
        assert!(link.message.contains("2. Burzum - Filosofem (VINYL) x2 - $30.00"));
        assert!(link.message.ends_with("Total: $75.00"));
    }

    #[test]
    fn test_out_of_stock_and_empty() {
        let number = WhatsAppNumber::parse("6281234567890").unwrap();
        let sold_out = product("1", "Mayhem", "Deathcrush", 3000, false);
        assert!(matches!(
            number.product_link("Blackmarch", &sold_out),
            Err(CommerceError::OutOfStock(_))
        ));
        assert!(matches!(
            number.cart_link("Blackmarch", &Cart::new()),
            Err(CommerceError::EmptyCart)
        ));
    }
}
