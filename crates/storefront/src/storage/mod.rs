//! Durable key-value storage for the store mirrors.
//!
//! Each store mirrors its in-memory state into one fixed key of a
//! [`KeyValueStore`]. The in-memory state is always authoritative; the
//! durable copy is only read once, when the store is created.
//!
//! # Backends
//!
//! - [`FileStore`] - one JSON file per key in a data directory
//! - [`MemoryStore`] - in-process map, lost on exit
//! - [`NoopStore`] - no durable storage available; reads find nothing
//!
//! # Keys
//!
//! The fixed keys live in [`keys`]. Keys are restricted to ASCII
//! alphanumerics, `-` and `_` so every backend can use them verbatim.

mod binding;
mod file;
mod memory;

pub use binding::PersistentBinding;
pub use file::FileStore;
pub use memory::{MemoryStore, NoopStore};

use thiserror::Error;

/// Fixed storage keys, one per store.
pub mod keys {
    /// Key for the cart line items.
    pub const CART: &str = "cart";

    /// Key for the wishlist entries.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the signed-in user.
    pub const SESSION: &str = "session";
}

/// Errors raised by a storage backend.
///
/// These never reach store callers: [`PersistentBinding`] logs them and
/// falls back to the empty state on read, or drops the write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be converted to or from JSON.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key contains characters the backends do not accept.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A synchronous string key-value store.
///
/// Implementations must be usable from every component that holds the
/// application context, hence `Send + Sync`.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write did not complete.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the delete did not complete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Check that a key is safe to use with every backend.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
