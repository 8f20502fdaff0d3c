//! Change subscriptions for store state.
//!
//! Components that render store state register a callback and are handed
//! a snapshot of the new state after every change.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of change callbacks.
pub struct Subscribers<T: ?Sized> {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T: ?Sized> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            callbacks: Mutex::new(Vec::new()),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.len())
            .finish()
    }
}

impl<T: ?Sized> Subscribers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Callbacks run in registration order.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let callback: Callback<T> = Arc::new(callback);
        self.lock().push((id, callback));
        id
    }

    /// Remove a callback. Returns false if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.lock();
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every registered callback with `value`.
    ///
    /// The list is copied first, so callbacks may subscribe or unsubscribe
    /// without deadlocking; such changes apply from the next notification.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Callback<T>)>> {
        self.callbacks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
