//! Cart store: the persisted owner of the cart.
//!
//! Wraps the pure [`Cart`] state machine with persistence. Every mutator
//! applies the transition and then writes the whole cart back under
//! [`keys::CART`]. A failed write is logged and the in-memory cart stays
//! authoritative, so the storefront keeps working.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::instrument;
use venus_core::{
    AddOutcome, Cart, CartError, CartSummary, CheckoutError, OrderReceipt, UpdateOutcome,
};

use crate::storage::{self, KeyValueStore, StorageError, keys};

/// Owns the cart and its backing store.
pub struct CartStore {
    cart: Cart,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Rebuild the cart from `store`.
    ///
    /// A missing or malformed stored cart yields an empty cart.
    pub fn rehydrate(store: Arc<dyn KeyValueStore>) -> Self {
        let cart: Cart = storage::load_json(store.as_ref(), keys::CART).unwrap_or_default();
        tracing::debug!(items = cart.len(), "Cart rehydrated");
        Self { cart, store }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of all quantities, for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Current order totals.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// Add one unit of `name` at `unit_price` and persist.
    ///
    /// # Errors
    ///
    /// Returns `CartError::TotalOutOfRange` if the order total would no
    /// longer fit. The cart and storage are left unchanged.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, name: &str, unit_price: Decimal) -> Result<AddOutcome, CartError> {
        let outcome = self.cart.add_item(name, unit_price).inspect_err(|e| {
            tracing::warn!(item = name, price = %unit_price, error = %e, "Add to cart refused");
        })?;
        if let AddOutcome::Incremented {
            price_ignored: true,
            ..
        } = outcome
        {
            let kept = self.cart.get(name).map(|item| item.unit_price);
            tracing::warn!(
                item = name,
                ?kept,
                offered = %unit_price,
                "Item already in cart at a different price; keeping the first price"
            );
        }
        self.persist_or_log();
        Ok(outcome)
    }

    /// Change the quantity of `name` by `delta` and persist.
    ///
    /// Unknown names are ignored without touching storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError::TotalOutOfRange` if an increase would push the
    /// order total out of range. The cart and storage are left unchanged.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, name: &str, delta: i64) -> Result<UpdateOutcome, CartError> {
        let outcome = self.cart.update_quantity(name, delta).inspect_err(|e| {
            tracing::warn!(item = name, delta, error = %e, "Quantity change refused");
        })?;
        if outcome != UpdateOutcome::NotFound {
            self.persist_or_log();
        }
        Ok(outcome)
    }

    /// Remove `name` and persist. Returns whether anything was removed.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, name: &str) -> bool {
        let removed = self.cart.remove_item(name);
        self.persist_or_log();
        removed
    }

    /// Empty the cart and persist.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist_or_log();
    }

    /// Place the order: build the receipt, then clear the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` and leaves the cart untouched if
    /// there is nothing to order.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<OrderReceipt, CheckoutError> {
        let receipt = OrderReceipt::for_cart(&self.cart)?;
        self.clear();
        tracing::info!(
            lines = receipt.lines.len(),
            total = %receipt.summary.total,
            "Order placed"
        );
        Ok(receipt)
    }

    /// Write the cart to the backing store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be serialized or written.
    pub fn persist(&self) -> Result<(), StorageError> {
        storage::save_json(self.store.as_ref(), keys::CART, &self.cart)
    }

    fn persist_or_log(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "Failed to persist cart; continuing with in-memory state");
        }
    }
}
