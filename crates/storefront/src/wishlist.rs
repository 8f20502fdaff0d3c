//! Wishlist store.
//!
//! Saved products in insertion order, at most one entry per product ID.
//! Unlike the cart, every wishlist action reports back to the shopper
//! through the notification sink.

use std::sync::Arc;

use shopease_core::{Product, ProductId, WishlistEntry};

use crate::mirrored::MirroredList;
use crate::notify::{Notification, NotificationSink};
use crate::observer::SubscriptionId;
use crate::storage::PersistentBinding;

/// Shopper-facing messages.
pub mod messages {
    pub const ADDED: &str = "Added to wishlist";
    pub const ALREADY_PRESENT: &str = "Already in wishlist";
    pub const REMOVED: &str = "Removed from wishlist";
    pub const CLEARED: &str = "Wishlist cleared";
}

/// Result of [`WishlistStore::add_to_wishlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAddOutcome {
    /// The product was appended.
    Added,
    /// A product with the same ID was already saved; nothing changed.
    AlreadyPresent,
}

/// The wishlist.
pub struct WishlistStore {
    entries: MirroredList<WishlistEntry>,
    sink: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// Create the wishlist, seeded from the durable mirror if it holds a
    /// valid saved wishlist.
    #[must_use]
    pub fn load(
        mirror: PersistentBinding<Vec<WishlistEntry>>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let mut entries = mirror.load();
        let before = entries.len();
        dedup_by_id(&mut entries);
        if entries.len() != before {
            tracing::warn!(
                dropped = before - entries.len(),
                "dropping repeated saved wishlist entries"
            );
        }
        tracing::debug!(entries = entries.len(), "wishlist loaded");
        Self {
            entries: MirroredList::new(entries, mirror),
            sink,
        }
    }

    /// Save `product`, unless a product with the same ID is already saved.
    pub fn add_to_wishlist(&self, product: Product) -> WishlistAddOutcome {
        let id = product.id.clone();
        let added = self.entries.mutate(|entries| {
            if entries.iter().any(|entry| entry.id() == &product.id) {
                return false;
            }
            entries.push(WishlistEntry::from(product));
            true
        });

        if added {
            tracing::debug!(product_id = %id, "added to wishlist");
            self.sink.notify(Notification::success(messages::ADDED));
            WishlistAddOutcome::Added
        } else {
            tracing::debug!(product_id = %id, "already in wishlist");
            self.sink.notify(Notification::info(messages::ALREADY_PRESENT));
            WishlistAddOutcome::AlreadyPresent
        }
    }

    /// Remove the entry for `product_id`.
    ///
    /// Reports "removed" whether or not the product was saved; the return
    /// value tells the caller if anything actually changed.
    pub fn remove_from_wishlist(&self, product_id: &ProductId) -> bool {
        let removed = self.entries.mutate(|entries| {
            let before = entries.len();
            entries.retain(|entry| entry.id() != product_id);
            entries.len() != before
        });
        tracing::debug!(product_id = %product_id, removed, "removed from wishlist");
        self.sink.notify(Notification::success(messages::REMOVED));
        removed
    }

    /// Remove every entry.
    pub fn clear_wishlist(&self) {
        let changed = self.entries.mutate(|entries| {
            let had_entries = !entries.is_empty();
            entries.clear();
            had_entries
        });
        tracing::debug!(changed, "wishlist cleared");
        self.sink.notify(Notification::success(messages::CLEARED));
    }

    /// Number of saved products.
    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Snapshot of the entries in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<WishlistEntry> {
        self.entries.read().clone()
    }

    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<WishlistEntry> {
        self.entries
            .read()
            .iter()
            .find(|entry| entry.id() == product_id)
            .cloned()
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries
            .read()
            .iter()
            .any(|entry| entry.id() == product_id)
    }

    /// Be called with the new entries after every change.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&[WishlistEntry]) + Send + Sync + 'static,
    {
        self.entries.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.entries.unsubscribe(id)
    }
}

fn dedup_by_id(entries: &mut Vec<WishlistEntry>) {
    let mut seen: Vec<ProductId> = Vec::with_capacity(entries.len());
    entries.retain(|entry| {
        if seen.contains(entry.id()) {
            false
        } else {
            seen.push(entry.id().clone());
            true
        }
    });
}
