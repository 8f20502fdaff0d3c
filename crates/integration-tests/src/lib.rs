//! Integration tests for ShopEase.
//!
//! Exercises the storefront stores end to end: a shopper session driven
//! through [`AppContext`], mirrored to a real storage backend, then
//! reopened as a fresh process would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopease-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - Reloading stores from the file mirror
//! - `shopping_session` - Cart, wishlist and checkout flows

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use secrecy::SecretString;
use shopease_core::{Price, Product};
use shopease_storefront::notify::RecordingSink;
use shopease_storefront::storage::{FileStore, MemoryStore};
use shopease_storefront::{AppContext, StorefrontConfig};

/// A catalog product with a price in cents.
#[must_use]
pub fn product(id: &str, cents: i64) -> Product {
    Product::new(id, format!("Product {id}"), Price::new(Decimal::new(cents, 2)))
}

/// A non-empty password accepted by the demo credentials provider.
#[must_use]
pub fn password() -> SecretString {
    SecretString::from("hunter2".to_owned())
}

/// Open a context over the file mirror in `dir`.
///
/// # Panics
///
/// Panics if the data directory cannot be created.
#[must_use]
#[allow(clippy::expect_used)]
pub fn file_context(dir: &Path) -> (AppContext, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let kv = FileStore::open(dir).expect("Failed to open file store");
    let ctx = AppContext::new(
        StorefrontConfig::default().with_data_dir(dir),
        Arc::new(kv),
        sink.clone(),
    );
    (ctx, sink)
}

/// Open a context over a fresh in-memory mirror.
#[must_use]
pub fn memory_context() -> (AppContext, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let ctx = AppContext::new(
        StorefrontConfig::default(),
        Arc::new(MemoryStore::new()),
        sink.clone(),
    );
    (ctx, sink)
}
