//! Shared state cell behind the cart and wishlist stores.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, TryLockError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::observer::{SubscriptionId, Subscribers};
use crate::storage::PersistentBinding;

/// An ordered list mirrored to durable storage, with change subscribers.
///
/// All mutation goes through [`MirroredList::mutate`], which serializes
/// writers: a change and its mirror write complete before the next change
/// starts.
///
/// Snapshots are queued in mutation order while the write lock is held and
/// delivered by one thread at a time, so subscribers see changes in the
/// order they happened even when several threads mutate at once. A change
/// made from inside a callback is delivered after that callback returns.
pub(crate) struct MirroredList<T> {
    items: RwLock<Vec<T>>,
    mirror: PersistentBinding<Vec<T>>,
    subscribers: Subscribers<[T]>,
    pending: Mutex<VecDeque<Vec<T>>>,
    delivering: Mutex<()>,
}

impl<T> fmt::Debug for MirroredList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MirroredList")
            .field("len", &self.read().len())
            .field("mirror", &self.mirror)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

impl<T> MirroredList<T> {
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

impl<T> MirroredList<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Wrap `initial`, which the caller has already loaded from `mirror`.
    pub(crate) fn new(initial: Vec<T>, mirror: PersistentBinding<Vec<T>>) -> Self {
        Self {
            items: RwLock::new(initial),
            mirror,
            subscribers: Subscribers::new(),
            pending: Mutex::new(VecDeque::new()),
            delivering: Mutex::new(()),
        }
    }

    /// Apply `op` under the write lock.
    ///
    /// `op` reports whether it changed the list. On a change the new list
    /// is mirrored and a snapshot queued before the lock is released, then
    /// subscribers are called. Returns what `op` returned.
    pub(crate) fn mutate<F>(&self, op: F) -> bool
    where
        F: FnOnce(&mut Vec<T>) -> bool,
    {
        {
            let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
            if !op(&mut *items) {
                return false;
            }
            self.mirror.save(&*items);
            self.pending().push_back(items.clone());
        }
        self.deliver();
        true
    }

    /// Hand queued snapshots to subscribers, oldest first.
    ///
    /// Returns at once if another call is already delivering; that call
    /// picks up whatever was queued.
    fn deliver(&self) {
        loop {
            let guard = match self.delivering.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => return,
            };
            loop {
                let next = self.pending().pop_front();
                let Some(snapshot) = next else { break };
                self.subscribers.notify(&snapshot);
            }
            drop(guard);

            // A snapshot queued between the last pop and the unlock would
            // otherwise wait for the next change.
            if self.pending().is_empty() {
                return;
            }
        }
    }

    fn pending(&self) -> MutexGuard<'_, VecDeque<Vec<T>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use super::*;
    use crate::storage::{MemoryStore, keys};

    fn list() -> Arc<MirroredList<u32>> {
        let mirror = PersistentBinding::new(Arc::new(MemoryStore::new()), keys::CART);
        Arc::new(MirroredList::new(Vec::new(), mirror))
    }

    fn push(list: &MirroredList<u32>, value: u32) -> bool {
        list.mutate(|items| {
            items.push(value);
            true
        })
    }

    #[test]
    fn test_concurrent_changes_are_delivered_in_order() {
        let list = list();
        let lengths = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&lengths);
        list.subscribe(move |items: &[u32]| seen.lock().unwrap().push(items.len()));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let list = Arc::clone(&list);
                thread::spawn(move || {
                    for i in 0..25 {
                        push(&list, worker * 100 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lengths = lengths.lock().unwrap();
        assert_eq!(*lengths, (1..=200).collect::<Vec<usize>>());
        assert_eq!(list.read().len(), 200);
    }

    #[test]
    fn test_change_from_callback_is_delivered_after_it() {
        let list = list();
        let lengths = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&lengths);
        let inner = Arc::clone(&list);
        list.subscribe(move |items: &[u32]| {
            seen.lock().unwrap().push(items.len());
            if items.len() == 1 {
                push(&inner, 2);
            }
        });

        push(&list, 1);

        assert_eq!(*lengths.lock().unwrap(), vec![1, 2]);
        assert_eq!(*list.read(), vec![1, 2]);
    }

    #[test]
    fn test_unchanged_call_is_not_delivered() {
        let list = list();
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        list.subscribe(move |_: &[u32]| *counter.lock().unwrap() += 1);

        assert!(!list.mutate(|_| false));
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}
