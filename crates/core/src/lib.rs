//! ShopEase Core - Shared types library.
//!
//! This crate provides common types used across all ShopEase components:
//! - `storefront` - Cart, wishlist and session state
//! - `cli` - Terminal storefront built on the state core
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product references, cart and wishlist entries, prices, IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
