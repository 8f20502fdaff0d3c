//! Integration tests for the durable mirror.
//!
//! Each test writes through one context, then opens a second context on
//! the same data directory the way a restarted process would.

#![allow(clippy::unwrap_used)]

use std::fs;

use serde_json::{Value, json};
use shopease_core::ProductId;
use shopease_integration_tests::{file_context, password, product};

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_cart_reload_keeps_ids_order_and_quantities() {
    let dir = tempfile::tempdir().unwrap();
    let before = {
        let (ctx, _) = file_context(dir.path());
        ctx.cart().add_to_cart(product("b", 500));
        ctx.cart().add_to_cart(product("a", 1000));
        ctx.cart().add_to_cart(product("b", 500));
        ctx.cart().update_quantity(&ProductId::from("a"), 4);
        ctx.cart().items()
    };

    let (ctx, _) = file_context(dir.path());
    let after = ctx.cart().items();
    assert_eq!(after, before);

    let summary: Vec<(&str, u32)> = after
        .iter()
        .map(|item| (item.id().as_str(), item.quantity))
        .collect();
    assert_eq!(summary, vec![("b", 2), ("a", 4)]);
}

#[test]
fn test_wishlist_reload_keeps_entries() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (ctx, _) = file_context(dir.path());
        ctx.wishlist().add_to_wishlist(product("x", 1500));
        ctx.wishlist().add_to_wishlist(product("y", 2500));
        ctx.wishlist().remove_from_wishlist(&ProductId::from("x"));
    }

    let (ctx, _) = file_context(dir.path());
    assert_eq!(ctx.wishlist().wishlist_count(), 1);
    assert!(ctx.wishlist().contains(&ProductId::from("y")));
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (ctx, _) = file_context(dir.path());
        ctx.session().login("sam@shop.example", &password()).unwrap();
    }

    let (ctx, _) = file_context(dir.path());
    let user = ctx.session().current().unwrap();
    assert_eq!(user.name, "sam");

    ctx.session().logout();
    assert!(!dir.path().join("session.json").exists());
    let (ctx, _) = file_context(dir.path());
    assert!(!ctx.session().is_authenticated());
}

#[test]
fn test_mirror_is_flat_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, _) = file_context(dir.path());
    ctx.cart().add_to_cart(product("a", 1250));

    let raw = fs::read_to_string(dir.path().join("cart.json")).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        json!([{ "id": "a", "title": "Product a", "price": 12.5, "quantity": 1 }])
    );
}

#[test]
fn test_cleared_cart_reloads_empty() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (ctx, _) = file_context(dir.path());
        ctx.cart().add_to_cart(product("a", 100));
        ctx.cart().clear_cart();
    }

    let (ctx, _) = file_context(dir.path());
    assert!(ctx.cart().is_empty());
}

// ============================================================================
// Invalid Mirror Contents
// ============================================================================

#[test]
fn test_unparseable_mirror_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cart.json"), "{not json").unwrap();
    fs::write(dir.path().join("wishlist.json"), "").unwrap();

    let (ctx, _) = file_context(dir.path());
    assert!(ctx.cart().is_empty());
    assert_eq!(ctx.wishlist().wishlist_count(), 0);
}

#[test]
fn test_non_array_mirror_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cart.json"), r#"{"id":"a","quantity":1}"#).unwrap();
    fs::write(dir.path().join("wishlist.json"), "42").unwrap();

    let (ctx, _) = file_context(dir.path());
    assert!(ctx.cart().is_empty());
    assert_eq!(ctx.wishlist().wishlist_count(), 0);
}

#[test]
fn test_invalid_mirror_is_replaced_on_next_change() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cart.json"), "garbage").unwrap();

    {
        let (ctx, _) = file_context(dir.path());
        ctx.cart().add_to_cart(product("a", 100));
    }

    let (ctx, _) = file_context(dir.path());
    assert_eq!(ctx.cart().cart_count(), 1);
}

#[test]
fn test_catalog_spelling_in_mirror_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("wishlist.json"),
        r#"[{"_id":"65f1","title":"Desk Lamp","price":39.5,"category":"Home"}]"#,
    )
    .unwrap();

    let (ctx, _) = file_context(dir.path());
    let entry = ctx.wishlist().get(&ProductId::from("65f1")).unwrap();
    assert_eq!(entry.product().extra.get("category"), Some(&json!("Home")));
}
