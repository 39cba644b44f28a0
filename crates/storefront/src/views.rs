//! View models for templates.
//!
//! Everything here is derived from current state and pre-formatted for
//! display, so templates only place strings. Page switching and cart
//! rendering are plain functions of their inputs.

use venus_core::{Cart, CartLineItem, CartSummary, Price};

/// Fingerprint of `static/css/main.css`, computed by the build script.
const CSS_HASH: &str = env!("CSS_HASH");

/// URL of the stylesheet, fingerprinted when a hash is available.
#[must_use]
pub fn stylesheet_href() -> String {
    if CSS_HASH.is_empty() {
        "/static/css/main.css".to_string()
    } else {
        format!("/static/css/derived/main.{CSS_HASH}.css")
    }
}

// =============================================================================
// Pages
// =============================================================================

/// The named sections of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Cakes,
    Snacks,
    ContactInfo,
    ContactForm,
    Cart,
}

impl Page {
    /// Every page, in navigation order.
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::Cakes,
        Self::Snacks,
        Self::ContactInfo,
        Self::ContactForm,
        Self::Cart,
    ];

    /// Page identifier as used in URLs and section ids.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Cakes => "cakes",
            Self::Snacks => "snacks",
            Self::ContactInfo => "contact-info",
            Self::ContactForm => "contact-form",
            Self::Cart => "cart",
        }
    }

    /// Look up a page by identifier (exact match).
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.id() == id)
    }

    /// URL that shows this page.
    #[must_use]
    pub fn href(self) -> String {
        match self {
            Self::Home => "/".to_string(),
            _ => format!("/page/{}", self.id()),
        }
    }
}

/// Which section is visible after a page switch.
///
/// Every known section starts hidden; at most the requested one is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageVisibility {
    visible: Option<Page>,
}

impl PageVisibility {
    /// Hide everything, then show `page_id` if it names a known page.
    #[must_use]
    pub fn show(page_id: &str) -> Self {
        Self {
            visible: Page::from_id(page_id),
        }
    }

    /// The visible page, if any.
    #[must_use]
    pub const fn visible(&self) -> Option<Page> {
        self.visible
    }

    /// Whether the section `id` is visible.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.is_some_and(|page| page.id() == id)
    }

    /// CSS class for the section `id`.
    #[must_use]
    pub fn class_for(&self, id: &str) -> &'static str {
        if self.is_visible(id) { "" } else { "hidden" }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Cart row display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            name: item.name.clone(),
            unit_price: Price::inr(item.unit_price).display_exact(),
            quantity: item.quantity,
            line_total: Price::inr(item.line_total()).display(),
        }
    }
}

/// Order summary display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub subtotal: String,
    pub tax: String,
    pub delivery: String,
    pub total: String,
}

impl From<&CartSummary> for SummaryView {
    fn from(summary: &CartSummary) -> Self {
        Self {
            subtotal: summary.subtotal_price().display(),
            tax: summary.tax_price().display(),
            delivery: summary.delivery_price().display_exact(),
            total: summary.total_price().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub summary: SummaryView,
    pub item_count: u64,
}

impl CartView {
    /// Derive the cart list, summary and badge from `cart`.
    #[must_use]
    pub fn render(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            summary: SummaryView::from(&cart.summary()),
            item_count: cart.item_count(),
        }
    }

    /// Whether to show the empty-cart call to action.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Feedback
// =============================================================================

/// Short-lived acknowledgement overlay. The stylesheet dismisses it after 3s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
}

impl Toast {
    /// Acknowledge that `name` was added to the cart.
    #[must_use]
    pub fn added(name: &str) -> Self {
        Self {
            message: format!("✓ {name} added to cart!"),
        }
    }
}
