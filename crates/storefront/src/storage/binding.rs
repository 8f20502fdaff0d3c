//! Typed binding of one store to one storage key.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, StorageError};

/// Write-through JSON mirror of a value under a fixed key.
///
/// [`load`](Self::load) and [`save`](Self::save) never fail: storage faults
/// are logged and the caller carries on with its in-memory state.
pub struct PersistentBinding<T> {
    kv: Arc<dyn KeyValueStore>,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> Clone for PersistentBinding<T> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            key: self.key,
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PersistentBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentBinding")
            .field("key", &self.key)
            .field("value", &type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T> PersistentBinding<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Bind `key` in `kv`.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            kv,
            key,
            _value: PhantomData,
        }
    }

    /// The storage key this binding writes to.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Read the mirrored value.
    ///
    /// Returns `T::default()` when the key is missing, the backend cannot be
    /// read, or the stored text is not valid JSON of the expected shape.
    #[must_use]
    pub fn load(&self) -> T {
        match self.try_load() {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!(key = self.key, "no saved state, starting empty");
                T::default()
            }
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "discarding unreadable saved state");
                T::default()
            }
        }
    }

    /// Serialize `value` and write it under the bound key.
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn save(&self, value: &T) {
        if let Err(e) = self.try_save(value) {
            tracing::warn!(key = self.key, error = %e, "failed to persist state");
        }
    }

    /// Delete the bound key, so the next [`load`](Self::load) starts from
    /// `T::default()`.
    ///
    /// A failed delete is logged and otherwise ignored.
    pub fn clear(&self) {
        if let Err(e) = self.kv.remove(self.key) {
            tracing::warn!(key = self.key, error = %e, "failed to clear persisted state");
        }
    }

    fn try_load(&self) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.kv.get(self.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn try_save(&self, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(self.key, &raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, NoopStore};

    fn memory() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn test_load_missing_key_is_default() {
        let binding: PersistentBinding<Vec<u32>> = PersistentBinding::new(memory(), "cart");
        assert!(binding.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let kv = memory();
        let binding: PersistentBinding<Vec<u32>> = PersistentBinding::new(kv.clone(), "cart");

        binding.save(&vec![3, 1, 2]);

        assert_eq!(kv.get("cart").unwrap().as_deref(), Some("[3,1,2]"));
        assert_eq!(binding.load(), vec![3, 1, 2]);
    }

    #[test]
    fn test_invalid_json_is_default() {
        let kv = memory();
        kv.set("cart", "{not json").unwrap();

        let binding: PersistentBinding<Vec<u32>> = PersistentBinding::new(kv, "cart");
        assert!(binding.load().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_default() {
        let kv = memory();
        kv.set("cart", r#"{"items":[1,2]}"#).unwrap();

        let binding: PersistentBinding<Vec<u32>> = PersistentBinding::new(kv.clone(), "cart");
        assert!(binding.load().is_empty());

        kv.set("cart", "null").unwrap();
        assert!(binding.load().is_empty());
    }

    #[test]
    fn test_clear_removes_key() {
        let kv = memory();
        let binding: PersistentBinding<Vec<u32>> = PersistentBinding::new(kv.clone(), "cart");
        binding.save(&vec![1]);

        binding.clear();
        binding.clear();

        assert!(kv.is_empty());
        assert!(binding.load().is_empty());
    }

    #[test]
    fn test_noop_backend() {
        let binding: PersistentBinding<Vec<u32>> =
            PersistentBinding::new(Arc::new(NoopStore), "cart");
        binding.save(&vec![1]);
        assert!(binding.load().is_empty());
    }

    #[test]
    fn test_save_to_invalid_key_is_swallowed() {
        let kv = memory();
        let binding: PersistentBinding<Vec<u32>> = PersistentBinding::new(kv.clone(), "bad key");
        binding.save(&vec![1]);
        assert!(kv.is_empty());
        assert!(binding.load().is_empty());
    }
}
