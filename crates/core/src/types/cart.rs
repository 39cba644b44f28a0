//! Cart state machine.
//!
//! A cart is an ordered list of line items keyed by display name. It has two
//! observable states, empty and non-empty. Every transition here is pure:
//! persisting the result and re-rendering are the caller's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::price::Price;

/// Sales tax applied to the subtotal (5%).
pub const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Flat delivery fee charged on any non-empty cart.
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// One distinct product entry in the cart.
///
/// Serialized as `{"name", "price", "quantity"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Display name, unique within a cart (exact, case-sensitive match).
    pub name: String,
    /// Price of a single unit, fixed by the first add of this name.
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartLineItem {
    /// Unit price multiplied by quantity, saturating at the decimal range.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Unit price multiplied by quantity, or `None` if it does not fit.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Reasons a cart transition can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The order total would no longer fit in a decimal.
    #[error("The order total would be too large.")]
    TotalOutOfRange,
}

/// What `Cart::add_item` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended with quantity 1.
    Added,
    /// An existing line item's quantity went up by one.
    ///
    /// `price_ignored` is set when the caller passed a different price than
    /// the one already on the line.
    Incremented { quantity: u32, price_ignored: bool },
}

/// What `Cart::update_quantity` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No line item has that name.
    NotFound,
    /// The quantity changed and stayed positive.
    Updated { quantity: u32 },
    /// The quantity dropped to zero or below and the item was removed.
    Removed,
}

/// Derived order totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery: Decimal,
    pub total: Decimal,
}

impl CartSummary {
    /// Subtotal as a display price.
    #[must_use]
    pub const fn subtotal_price(&self) -> Price {
        Price::inr(self.subtotal)
    }

    /// Tax as a display price.
    #[must_use]
    pub const fn tax_price(&self) -> Price {
        Price::inr(self.tax)
    }

    /// Delivery fee as a display price.
    #[must_use]
    pub const fn delivery_price(&self) -> Price {
        Price::inr(self.delivery)
    }

    /// Grand total as a display price.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::inr(self.total)
    }
}

/// An ordered collection of line items, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl From<Vec<CartLineItem>> for Cart {
    /// Build a cart from stored items, dropping any with a zero quantity.
    fn from(items: Vec<CartLineItem>) -> Self {
        Self {
            items: items.into_iter().filter(|item| item.quantity > 0).collect(),
        }
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Find a line item by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Sum of all line-item quantities (the cart badge value).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Add one unit of `name`.
    ///
    /// An existing line keeps its original price; only the quantity changes.
    /// The sign and size of `unit_price` are not checked, but the add is
    /// refused if the order total would fall outside the decimal range.
    ///
    /// # Errors
    ///
    /// Returns `CartError::TotalOutOfRange` and leaves the cart unchanged if
    /// the new totals cannot be represented.
    pub fn add_item(&mut self, name: &str, unit_price: Decimal) -> Result<AddOutcome, CartError> {
        self.try_apply(|items| {
            if let Some(item) = items.iter_mut().find(|item| item.name == name) {
                item.quantity = item.quantity.saturating_add(1);
                return AddOutcome::Incremented {
                    quantity: item.quantity,
                    price_ignored: item.unit_price != unit_price,
                };
            }

            items.push(CartLineItem {
                name: name.to_owned(),
                unit_price,
                quantity: 1,
            });
            AddOutcome::Added
        })
    }

    /// Change the quantity of `name` by `delta`.
    ///
    /// A result of zero or less removes the line. Unknown names are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::TotalOutOfRange` and leaves the cart unchanged if
    /// an increase would push the totals out of range. Decreases and
    /// removals always succeed.
    pub fn update_quantity(&mut self, name: &str, delta: i64) -> Result<UpdateOutcome, CartError> {
        let Some(current) = self.get(name).map(|item| item.quantity) else {
            return Ok(UpdateOutcome::NotFound);
        };

        let quantity = i64::from(current).saturating_add(delta);
        if quantity <= 0 {
            self.remove_item(name);
            return Ok(UpdateOutcome::Removed);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let set = |items: &mut Vec<CartLineItem>| {
            for item in items.iter_mut().filter(|item| item.name == name) {
                item.quantity = quantity;
            }
            UpdateOutcome::Updated { quantity }
        };

        if delta > 0 {
            self.try_apply(set)
        } else {
            Ok(set(&mut self.items))
        }
    }

    /// Remove the line named `name`. Returns whether anything was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        self.items.len() != before
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Compute subtotal, tax, delivery and total.
    ///
    /// Values are exact; round only when displaying. A cart whose totals do
    /// not fit (e.g. rehydrated from a hand-edited store) saturates at the
    /// decimal range instead of failing.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.checked_summary().unwrap_or_else(|| {
            let subtotal = self
                .items
                .iter()
                .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()));
            let tax = subtotal.saturating_mul(TAX_RATE);
            let delivery = self.delivery();

            CartSummary {
                subtotal,
                tax,
                delivery,
                total: subtotal.saturating_add(tax).saturating_add(delivery),
            }
        })
    }

    /// Compute the summary, or `None` if any amount overflows.
    #[must_use]
    pub fn checked_summary(&self) -> Option<CartSummary> {
        let subtotal = self.items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.checked_line_total()?)
        })?;
        let tax = subtotal.checked_mul(TAX_RATE)?;
        let delivery = self.delivery();

        Some(CartSummary {
            subtotal,
            tax,
            delivery,
            total: subtotal.checked_add(tax)?.checked_add(delivery)?,
        })
    }

    fn delivery(&self) -> Decimal {
        if self.is_empty() {
            Decimal::ZERO
        } else {
            DELIVERY_FEE
        }
    }

    /// Apply `change` to a copy of the items and keep it only if the totals
    /// still fit.
    fn try_apply<T>(
        &mut self,
        change: impl FnOnce(&mut Vec<CartLineItem>) -> T,
    ) -> Result<T, CartError> {
        let mut next = self.clone();
        let outcome = change(&mut next.items);
        if next.checked_summary().is_none() {
            return Err(CartError::TotalOutOfRange);
        }
        *self = next;
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_repeated_add_counts_calls_and_keeps_first_price() {
        let mut cart = Cart::new();
        for (i, price) in [500, 600, 700, 10].into_iter().enumerate() {
            cart.add_item("Chocolate Cake", dec(price)).unwrap();
            let expected = u32::try_from(i + 1).unwrap();
            assert_eq!(cart.get("Chocolate Cake").unwrap().quantity, expected);
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("Chocolate Cake").unwrap().unit_price, dec(500));
    }

    #[test]
    fn test_add_reports_ignored_price() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item("Samosa", dec(15)).unwrap(), AddOutcome::Added);
        assert_eq!(
            cart.add_item("Samosa", dec(15)).unwrap(),
            AddOutcome::Incremented {
                quantity: 2,
                price_ignored: false
            }
        );
        assert_eq!(
            cart.add_item("Samosa", dec(20)).unwrap(),
            AddOutcome::Incremented {
                quantity: 3,
                price_ignored: true
            }
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut cart = Cart::new();
        cart.add_item("Veg Puff", dec(25)).unwrap();
        cart.add_item("veg puff", dec(25)).unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_item("B", dec(1)).unwrap();
        cart.add_item("A", dec(1)).unwrap();
        cart.add_item("B", dec(1)).unwrap();
        let names: Vec<_> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_scenario_same_name_different_price() {
        let mut cart = Cart::new();
        cart.add_item("Chocolate Cake", dec(500)).unwrap();
        cart.add_item("Chocolate Cake", dec(600)).unwrap();

        let item = cart.get("Chocolate Cake").unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price, dec(500));

        let summary = cart.summary();
        assert_eq!(summary.subtotal, dec(1000));
        assert_eq!(summary.tax, dec(50));
        assert_eq!(summary.delivery, dec(50));
        assert_eq!(summary.total, dec(1100));
    }

    #[test]
    fn test_decrement_to_zero_removes_and_resets_delivery() {
        let mut cart = Cart::new();
        cart.add_item("Cream Roll", dec(20)).unwrap();
        assert_eq!(cart.summary().delivery, dec(50));

        assert_eq!(cart.update_quantity("Cream Roll", -1).unwrap(), UpdateOutcome::Removed);
        assert!(cart.is_empty());
        assert_eq!(cart.summary().delivery, Decimal::ZERO);
        assert_eq!(cart.summary().total, Decimal::ZERO);
    }

    #[test]
    fn test_large_negative_delta_removes() {
        let mut cart = Cart::new();
        cart.add_item("Cream Roll", dec(20)).unwrap();
        cart.add_item("Cream Roll", dec(20)).unwrap();
        assert_eq!(cart.update_quantity("Cream Roll", -50).unwrap(), UpdateOutcome::Removed);
        assert!(cart.get("Cream Roll").is_none());
    }

    #[test]
    fn test_update_never_leaves_non_positive_quantity() {
        let mut cart = Cart::new();
        cart.add_item("A", dec(1)).unwrap();
        cart.add_item("B", dec(2)).unwrap();
        for delta in [3, -1, -2, 5, -4, -1, 1, -10] {
            cart.update_quantity("A", delta).unwrap();
            cart.update_quantity("B", -delta).unwrap();
            assert!(cart.items().iter().all(|item| item.quantity >= 1));
        }
    }

    #[test]
    fn test_update_unknown_name_is_noop() {
        let mut cart = Cart::new();
        cart.add_item("A", dec(1)).unwrap();
        let before = cart.clone();
        assert_eq!(cart.update_quantity("Z", 4).unwrap(), UpdateOutcome::NotFound);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_increments() {
        let mut cart = Cart::new();
        cart.add_item("A", dec(1)).unwrap();
        assert_eq!(
            cart.update_quantity("A", 2).unwrap(),
            UpdateOutcome::Updated { quantity: 3 }
        );
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item("A", dec(1)).unwrap();
        cart.add_item("B", dec(1)).unwrap();
        assert!(cart.remove_item("A"));
        assert!(!cart.remove_item("A"));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add_item("A", dec(1)).unwrap();
        cart.add_item("A", dec(1)).unwrap();
        cart.add_item("B", dec(1)).unwrap();
        assert_eq!(cart.item_count(), 3);
        cart.clear();
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_summary_is_pure() {
        let mut cart = Cart::new();
        cart.add_item("Paneer Puff", Decimal::new(3550, 2)).unwrap();
        cart.add_item("Paneer Puff", Decimal::new(3550, 2)).unwrap();
        assert_eq!(cart.summary(), cart.summary());
    }

    #[test]
    fn test_summary_tax_not_rounded_during_accumulation() {
        let mut cart = Cart::new();
        cart.add_item("Cookie", Decimal::new(1005, 2)).unwrap(); // 10.05
        let summary = cart.summary();
        assert_eq!(summary.tax, Decimal::new(5025, 4)); // 0.5025
        assert_eq!(summary.tax_price().display(), "₹0.50");
        assert_eq!(summary.total, Decimal::new(605_525, 4)); // 60.5525
        assert_eq!(summary.total_price().display(), "₹60.55");
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = Cart::new().summary();
        assert_eq!(summary.subtotal, Decimal::ZERO);
        assert_eq!(summary.delivery, Decimal::ZERO);
        assert_eq!(summary.delivery_price().display_exact(), "₹0");
    }

    #[test]
    fn test_serde_round_trip_preserves_order_and_contents() {
        let mut cart = Cart::new();
        cart.add_item("Red Velvet Cake", dec(650)).unwrap();
        cart.add_item("Samosa", Decimal::new(155, 1)).unwrap();
        cart.add_item("Samosa", dec(15)).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_deserialize_accepts_numeric_prices() {
        let json = r#"[{"name":"Chocolate Cake","price":500,"quantity":2},
                       {"name":"Samosa","price":15.5,"quantity":1}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get("Samosa").unwrap().unit_price, Decimal::new(155, 1));
    }

    #[test]
    fn test_deserialize_drops_zero_quantities() {
        let json = r#"[{"name":"A","price":"1","quantity":0},{"name":"B","price":"1","quantity":1}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert!(cart.get("A").is_none());
    }

    #[test]
    fn test_negative_price_is_kept_as_is() {
        let mut cart = Cart::new();
        cart.add_item("Refund", dec(-10)).unwrap();

        assert_eq!(cart.get("Refund").unwrap().unit_price, dec(-10));
        let summary = cart.summary();
        assert_eq!(summary.subtotal, dec(-10));
        assert_eq!(summary.tax, Decimal::new(-5, 1));
        assert_eq!(summary.total, Decimal::new(395, 1));
    }

    #[test]
    fn test_add_refused_when_total_out_of_range() {
        let mut cart = Cart::new();
        cart.add_item("Samosa", dec(15)).unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.add_item("Gold Cake", Decimal::MAX),
            Err(CartError::TotalOutOfRange)
        );
        assert_eq!(cart, before);
        assert_eq!(cart.summary().total, Decimal::new(6575, 2));
    }

    #[test]
    fn test_increment_refused_when_line_total_out_of_range() {
        let mut cart = Cart::new();
        let half = Decimal::MAX / dec(2);
        cart.add_item("Big Cake", half).unwrap();

        assert_eq!(
            cart.add_item("Big Cake", half),
            Err(CartError::TotalOutOfRange)
        );
        assert_eq!(
            cart.update_quantity("Big Cake", 5),
            Err(CartError::TotalOutOfRange)
        );
        assert_eq!(cart.get("Big Cake").unwrap().quantity, 1);
        assert_eq!(cart.update_quantity("Big Cake", -1).unwrap(), UpdateOutcome::Removed);
    }

    #[test]
    fn test_summary_saturates_for_out_of_range_stored_cart() {
        let json = r#"[{"name":"Gold Cake","price":"79228162514264337593543950335","quantity":2}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert!(cart.checked_summary().is_none());
        let summary = cart.summary();
        assert_eq!(summary.subtotal, Decimal::MAX);
        assert_eq!(summary.total, Decimal::MAX);
    }
}
