//! Cart store.
//!
//! Holds the shopper's line items in insertion order, at most one per
//! product ID, each with a quantity of at least 1. Every change is written
//! through to the durable mirror before subscribers are told about it.
//!
//! The cart emits no notifications of its own; pages that call it decide
//! what feedback to show.

use shopease_core::{CartItem, Price, Product, ProductId};

use crate::mirrored::MirroredList;
use crate::observer::SubscriptionId;
use crate::storage::PersistentBinding;

/// The shopping cart.
#[derive(Debug)]
pub struct CartStore {
    lines: MirroredList<CartItem>,
}

impl CartStore {
    /// Create the cart, seeded from the durable mirror if it holds a valid
    /// saved cart.
    #[must_use]
    pub fn load(mirror: PersistentBinding<Vec<CartItem>>) -> Self {
        let items = normalize(mirror.load());
        tracing::debug!(lines = items.len(), "cart loaded");
        Self {
            lines: MirroredList::new(items, mirror),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`.
    ///
    /// Increments the quantity of the existing line for this product ID, or
    /// appends a new line with quantity 1.
    pub fn add_to_cart(&self, product: Product) {
        let id = product.id.clone();
        self.lines.mutate(|items| {
            if let Some(line) = items.iter_mut().find(|line| line.product.id == product.id) {
                line.quantity = line.quantity.saturating_add(1);
            } else {
                items.push(CartItem::new(product));
            }
            true
        });
        tracing::debug!(product_id = %id, "added to cart");
    }

    /// Set the quantity of a line to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the line. Unknown IDs are ignored.
    pub fn update_quantity(&self, product_id: &ProductId, quantity: i64) {
        let changed = self.lines.mutate(|items| {
            let Some(pos) = position(items, product_id) else {
                return false;
            };
            if quantity <= 0 {
                items.remove(pos);
                return true;
            }
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            items.get_mut(pos).is_some_and(|line| {
                let changed = line.quantity != quantity;
                line.quantity = quantity;
                changed
            })
        });
        tracing::debug!(product_id = %product_id, quantity, changed, "cart quantity updated");
    }

    /// Remove the line for `product_id`, if present.
    pub fn remove_from_cart(&self, product_id: &ProductId) {
        let changed = self.lines.mutate(|items| {
            position(items, product_id).is_some_and(|pos| {
                items.remove(pos);
                true
            })
        });
        tracing::debug!(product_id = %product_id, changed, "removed from cart");
    }

    /// Remove every line.
    pub fn clear_cart(&self) {
        let changed = self.lines.mutate(|items| {
            let had_items = !items.is_empty();
            items.clear();
            had_items
        });
        tracing::debug!(changed, "cart cleared");
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Sum of `price * quantity` over every line.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.lines.read().iter().map(CartItem::line_total).sum()
    }

    /// Total number of units in the cart (not the number of lines).
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.lines.read().iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Snapshot of the line items in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lines.read().clone()
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<CartItem> {
        self.lines
            .read()
            .iter()
            .find(|line| &line.product.id == product_id)
            .cloned()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.read().is_empty()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Be called with the new line items after every change.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&[CartItem]) + Send + Sync + 'static,
    {
        self.lines.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lines.unsubscribe(id)
    }
}

fn position(items: &[CartItem], product_id: &ProductId) -> Option<usize> {
    items.iter().position(|line| &line.product.id == product_id)
}

/// Restore the line-item invariants on a cart read back from storage:
/// zero-quantity lines are dropped and repeated IDs are merged into the
/// first occurrence.
fn normalize(saved: Vec<CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(saved.len());
    for line in saved {
        if line.quantity == 0 {
            tracing::warn!(product_id = %line.product.id, "dropping saved cart line with zero quantity");
            continue;
        }
        match items.iter_mut().find(|kept| kept.product.id == line.product.id) {
            Some(kept) => kept.quantity = kept.quantity.saturating_add(line.quantity),
            None => items.push(line),
        }
    }
    items
}
