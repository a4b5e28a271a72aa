//! Checkout module.
//!
//! Orders are placed over WhatsApp: checkout produces a `wa.me` link with
//! the order pre-filled as the message text.

mod whatsapp;

pub use whatsapp::{WhatsAppLink, WhatsAppNumber};
