//! Checkout entry gate.
//!
//! Decides whether the shopper may proceed from the cart to checkout and
//! prices the order summary. No order is placed here.

use serde::Serialize;
use thiserror::Error;

use shopease_core::{CartItem, Price};

use crate::cart::CartStore;
use crate::models::CurrentUser;
use crate::notify::{Notification, NotificationSink};

/// Shopper-facing messages.
pub mod messages {
    pub const LOGIN_REQUIRED: &str = "Please login to checkout";
    pub const EMPTY_CART: &str = "Your cart is empty";
    pub const PROCEEDING: &str = "Proceeding to checkout!";
}

/// Reasons checkout cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Nobody is signed in.
    #[error("login required to checkout")]
    LoginRequired,

    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,
}

/// Order summary shown beside the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    /// Total units across all lines.
    pub item_count: u64,
    pub subtotal: Price,
    /// Shipping is free.
    pub shipping: Price,
    /// Tax is not charged.
    pub tax: Price,
    pub total: Price,
}

impl CheckoutSummary {
    /// Price a set of cart lines.
    #[must_use]
    pub fn for_items(items: &[CartItem]) -> Self {
        let subtotal: Price = items.iter().map(CartItem::line_total).sum();
        let shipping = Price::ZERO;
        let tax = Price::ZERO;
        Self {
            item_count: items.iter().map(|line| u64::from(line.quantity)).sum(),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Price the current contents of `cart`.
    #[must_use]
    pub fn for_cart(cart: &CartStore) -> Self {
        Self::for_items(&cart.items())
    }
}

/// Start checkout for the signed-in shopper.
///
/// Sign-in is checked before the cart, so an anonymous shopper with an
/// empty cart is asked to log in first. The outcome is also reported
/// through `sink`.
///
/// # Errors
///
/// Returns `CheckoutError::LoginRequired` if `user` is `None`.
/// Returns `CheckoutError::EmptyCart` if the cart has no lines.
pub fn begin_checkout(
    user: Option<&CurrentUser>,
    cart: &CartStore,
    sink: &dyn NotificationSink,
) -> Result<CheckoutSummary, CheckoutError> {
    let Some(user) = user else {
        sink.notify(Notification::error(messages::LOGIN_REQUIRED));
        return Err(CheckoutError::LoginRequired);
    };

    let summary = CheckoutSummary::for_cart(cart);
    if summary.item_count == 0 {
        sink.notify(Notification::error(messages::EMPTY_CART));
        return Err(CheckoutError::EmptyCart);
    }

    tracing::info!(
        user_id = %user.id,
        items = summary.item_count,
        total = %summary.total,
        "checkout started"
    );
    sink.notify(Notification::success(messages::PROCEEDING));
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use shopease_core::{Email, Product};

    use super::*;
    use crate::notify::{NotificationKind, RecordingSink};
    use crate::storage::{MemoryStore, PersistentBinding, keys};

    fn cart() -> CartStore {
        CartStore::load(PersistentBinding::new(
            Arc::new(MemoryStore::new()),
            keys::CART,
        ))
    }

    fn shopper() -> CurrentUser {
        CurrentUser::from_credentials(Email::parse("kim@shop.example").unwrap())
    }

    #[test]
    fn test_requires_login_first() {
        let sink = RecordingSink::new();
        let result = begin_checkout(None, &cart(), &sink);

        assert_eq!(result, Err(CheckoutError::LoginRequired));
        let notes = sink.snapshot();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert_eq!(notes[0].message, messages::LOGIN_REQUIRED);
    }

    #[test]
    fn test_rejects_empty_cart() {
        let sink = RecordingSink::new();
        let result = begin_checkout(Some(&shopper()), &cart(), &sink);

        assert_eq!(result, Err(CheckoutError::EmptyCart));
        assert_eq!(sink.messages(), vec![messages::EMPTY_CART]);
    }

    #[test]
    fn test_summary_for_signed_in_shopper() {
        let cart = cart();
        cart.add_to_cart(Product::new("a", "A", Price::from_cents(1050)));
        cart.add_to_cart(Product::new("a", "A", Price::from_cents(1050)));
        cart.add_to_cart(Product::new("b", "B", Price::from(4)));

        let sink = RecordingSink::new();
        let summary = begin_checkout(Some(&shopper()), &cart, &sink).unwrap();

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, Price::from(25));
        assert_eq!(summary.shipping, Price::ZERO);
        assert_eq!(summary.tax, Price::ZERO);
        assert_eq!(summary.total, Price::from(25));
        assert_eq!(sink.messages(), vec![messages::PROCEEDING]);
        // The gate never changes the cart.
        assert_eq!(cart.cart_count(), 3);
    }

    #[test]
    fn test_summary_saturates_on_huge_prices() {
        let items = vec![
            CartItem {
                product: Product::new("a", "A", Price::MAX),
                quantity: 2,
            },
            CartItem::new(Product::new("b", "B", Price::from(5))),
        ];
        let summary = CheckoutSummary::for_items(&items);
        assert_eq!(summary.subtotal, Price::MAX);
        assert_eq!(summary.total, Price::MAX);
    }

    #[test]
    fn test_summary_of_no_items_is_zero() {
        let summary = CheckoutSummary::for_items(&[]);
        assert_eq!(summary.item_count, 0);
        assert!(summary.total.is_zero());
    }
}
