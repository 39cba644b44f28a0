//! Venus Core - Shared domain types.
//!
//! This crate provides the domain model used by the storefront:
//! - `storefront` - Public-facing bakery site (cart, pages, contact form)
//! - `integration-tests` - In-process router tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage access, no HTTP. Cart mutations and total computation live
//! here so they can be tested without a presentation surface.
//!
//! # Modules
//!
//! - [`types`] - Prices, the cart state machine, order receipts and contact records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
