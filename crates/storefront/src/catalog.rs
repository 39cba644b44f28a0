//! Product catalog for the cakes and snacks pages.
//!
//! The bakery menu is small and changes with a release, so it is compiled in.

use rust_decimal::Decimal;
use venus_core::Price;

/// A product offered on one of the menu pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: &'static str,
    pub description: &'static str,
    /// Price in whole rupees.
    pub rupees: u32,
}

impl CatalogItem {
    /// Unit price as a decimal.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        Decimal::from(self.rupees)
    }

    /// Display price, e.g. `₹500`.
    #[must_use]
    pub fn display_price(&self) -> String {
        Price::inr(self.unit_price()).display_exact()
    }
}

/// Cakes, in menu order.
pub const CAKES: &[CatalogItem] = &[
    CatalogItem {
        name: "Chocolate Cake",
        description: "Rich dark chocolate sponge with ganache",
        rupees: 500,
    },
    CatalogItem {
        name: "Black Forest Cake",
        description: "Cherries, whipped cream and chocolate shavings",
        rupees: 550,
    },
    CatalogItem {
        name: "Red Velvet Cake",
        description: "Cocoa sponge layered with cream cheese frosting",
        rupees: 650,
    },
    CatalogItem {
        name: "Pineapple Cake",
        description: "Light vanilla sponge with pineapple cream",
        rupees: 450,
    },
    CatalogItem {
        name: "Butterscotch Cake",
        description: "Caramelised praline crunch on butterscotch cream",
        rupees: 480,
    },
];

/// Snacks, in menu order.
pub const SNACKS: &[CatalogItem] = &[
    CatalogItem {
        name: "Veg Puff",
        description: "Flaky pastry with spiced vegetable filling",
        rupees: 25,
    },
    CatalogItem {
        name: "Paneer Puff",
        description: "Flaky pastry with masala paneer",
        rupees: 35,
    },
    CatalogItem {
        name: "Samosa",
        description: "Crisp pastry with potato and peas",
        rupees: 15,
    },
    CatalogItem {
        name: "Cream Roll",
        description: "Crisp pastry horn filled with sweet cream",
        rupees: 20,
    },
    CatalogItem {
        name: "Chocolate Cookies",
        description: "Box of six chunky chocolate chip cookies",
        rupees: 120,
    },
];
