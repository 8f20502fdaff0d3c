//! ShopEase Storefront library.
//!
//! The shopper-side state of the storefront: the cart, the wishlist and the
//! signed-in session, each mirrored to a local key-value store so it
//! survives restarts.
//!
//! # Architecture
//!
//! - [`state::AppContext`] is built once at start-up and handed to every
//!   consumer; there are no globals.
//! - [`cart::CartStore`] and [`wishlist::WishlistStore`] own their state.
//!   The durable copy in [`storage`] is a write-through mirror that is
//!   only read when a store is created.
//! - Consumers read snapshots and subscribe to changes ([`observer`]);
//!   they never mutate store state directly.
//! - Wishlist actions and checkout report to the shopper through a
//!   [`notify::NotificationSink`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
mod mirrored;
pub mod models;
pub mod notify;
pub mod observer;
pub mod services;
pub mod state;
pub mod storage;
pub mod wishlist;

pub use cart::CartStore;
pub use config::StorefrontConfig;
pub use error::AppError;
pub use state::AppContext;
pub use wishlist::{WishlistAddOutcome, WishlistStore};
