//! Integration tests for a shopper session.
//!
//! Drives the cart, wishlist, session and checkout together through one
//! shared context.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use shopease_core::{Price, ProductId};
use shopease_integration_tests::{memory_context, password, product};
use shopease_storefront::WishlistAddOutcome;
use shopease_storefront::notify::NotificationKind;
use shopease_storefront::services::checkout::{CheckoutError, messages as checkout_messages};
use shopease_storefront::wishlist::messages as wishlist_messages;

// ============================================================================
// Cart
// ============================================================================

#[test]
fn test_cart_totals_scenario() {
    let (ctx, _) = memory_context();
    ctx.cart().add_to_cart(product("a", 1000));
    ctx.cart().add_to_cart(product("b", 500));
    ctx.cart().add_to_cart(product("a", 1000));

    assert_eq!(ctx.cart().cart_total(), Price::from(25));
    assert_eq!(ctx.cart().cart_count(), 3);

    ctx.cart().update_quantity(&ProductId::from("a"), 0);
    assert_eq!(ctx.cart().cart_total(), Price::from(5));
    assert_eq!(ctx.cart().cart_count(), 1);
}

#[test]
fn test_cart_subscribers_see_every_change() {
    let (ctx, _) = memory_context();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = ctx.cart().subscribe(move |items| {
        let count: u32 = items.iter().map(|item| item.quantity).sum();
        sink.lock().unwrap().push(count);
    });

    ctx.cart().add_to_cart(product("a", 100));
    ctx.cart().add_to_cart(product("a", 100));
    ctx.cart().remove_from_cart(&ProductId::from("missing"));
    ctx.cart().clear_cart();
    assert!(ctx.cart().unsubscribe(id));
    ctx.cart().add_to_cart(product("b", 100));

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 0]);
}

// ============================================================================
// Wishlist
// ============================================================================

#[test]
fn test_wishlist_add_is_idempotent() {
    let (ctx, sink) = memory_context();

    let first = ctx.wishlist().add_to_wishlist(product("x", 100));
    let second = ctx.wishlist().add_to_wishlist(product("x", 100));

    assert_eq!(first, WishlistAddOutcome::Added);
    assert_eq!(second, WishlistAddOutcome::AlreadyPresent);
    assert_eq!(ctx.wishlist().wishlist_count(), 1);

    let kinds: Vec<NotificationKind> = sink.drain().into_iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NotificationKind::Success, NotificationKind::Info]);
}

#[test]
fn test_wishlist_remove_reports_even_when_absent() {
    let (ctx, sink) = memory_context();
    assert!(!ctx.wishlist().remove_from_wishlist(&ProductId::from("x")));
    assert_eq!(sink.messages(), vec![wishlist_messages::REMOVED]);
}

#[test]
fn test_move_to_cart() {
    let (ctx, _) = memory_context();
    ctx.wishlist().add_to_wishlist(product("x", 700));

    assert!(ctx.move_to_cart(&ProductId::from("x")));
    assert_eq!(ctx.cart().cart_total(), Price::from(7));
    assert_eq!(ctx.wishlist().wishlist_count(), 0);
}

// ============================================================================
// Session and Checkout
// ============================================================================

#[test]
fn test_switching_users_keeps_cart_and_wishlist() {
    let (ctx, _) = memory_context();
    ctx.session().login("amy@shop.example", &password()).unwrap();
    ctx.cart().add_to_cart(product("a", 100));
    ctx.wishlist().add_to_wishlist(product("x", 100));

    ctx.session().logout();
    let user = ctx.session().login("ben@shop.example", &password()).unwrap();

    assert_eq!(user.name, "ben");
    assert_eq!(ctx.cart().cart_count(), 1);
    assert_eq!(ctx.wishlist().wishlist_count(), 1);
}

#[test]
fn test_checkout_gates() {
    let (ctx, sink) = memory_context();

    assert_eq!(ctx.begin_checkout(), Err(CheckoutError::LoginRequired));

    ctx.session().login("amy@shop.example", &password()).unwrap();
    assert_eq!(ctx.begin_checkout(), Err(CheckoutError::EmptyCart));

    ctx.cart().add_to_cart(product("a", 1000));
    ctx.cart().add_to_cart(product("b", 500));
    ctx.cart().add_to_cart(product("a", 1000));
    let summary = ctx.begin_checkout().unwrap();
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.total, Price::from(25));
    assert!(summary.shipping.is_zero());

    assert_eq!(
        sink.messages(),
        vec![
            checkout_messages::LOGIN_REQUIRED,
            checkout_messages::EMPTY_CART,
            checkout_messages::PROCEEDING
        ]
    );
    // Checkout leaves the cart in place.
    assert_eq!(ctx.cart().cart_count(), 3);
}
