//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart_store` - Cart mutations, totals, checkout and persistence
//! - `contact` - Contact form submission log

pub mod cart_store;
pub mod contact;

pub use cart_store::CartStore;
pub use contact::ContactRecorder;
