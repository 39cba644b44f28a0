//! Order receipts produced at checkout.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::cart::{Cart, CartSummary};
use super::price::Price;

/// Reasons a checkout can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty. Please add items before checking out.")]
    EmptyCart,
}

/// One line of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// A human-readable summary of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub lines: Vec<ReceiptLine>,
    pub summary: CartSummary,
}

impl OrderReceipt {
    /// Build a receipt for `cart`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no items.
    pub fn for_cart(cart: &Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let lines = cart
            .items()
            .iter()
            .map(|item| ReceiptLine {
                name: item.name.clone(),
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        Ok(Self {
            lines,
            summary: cart.summary(),
        })
    }

    /// Grand total as a display price.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.summary.total_price()
    }

    /// The full confirmation shown to the customer after checkout.
    #[must_use]
    pub fn confirmation_message(&self) -> String {
        format!(
            "Thank you for your order!\n\n{self}\n\nWe will contact you shortly to confirm your order."
        )
    }
}

impl fmt::Display for OrderReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ORDER SUMMARY")?;
        writeln!(f)?;
        for line in &self.lines {
            writeln!(
                f,
                "{} x{} - {}",
                line.name,
                line.quantity,
                Price::inr(line.line_total)
            )?;
        }
        write!(f, "\nTotal: {}", self.total())
    }
}
