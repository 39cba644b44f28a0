//! Core types for the Venus Bake House storefront.
//!
//! This module provides the cart state machine and the records derived from it.

pub mod cart;
pub mod contact;
pub mod price;
pub mod receipt;

pub use cart::{AddOutcome, Cart, CartError, CartLineItem, CartSummary, UpdateOutcome};
pub use contact::{ContactMessage, ContactSubmission};
pub use price::{CurrencyCode, Price};
pub use receipt::{CheckoutError, OrderReceipt, ReceiptLine};
