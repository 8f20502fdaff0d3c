//! Plain-text rendering of store state.

use std::fmt::Write;

use shopease_core::{CartItem, WishlistEntry};
use shopease_storefront::models::CurrentUser;
use shopease_storefront::services::checkout::CheckoutSummary;

/// Render the cart page: one row per line, then the order summary.
pub fn cart(items: &[CartItem], summary: &CheckoutSummary, user: Option<&CurrentUser>) -> String {
    if items.is_empty() {
        return "Your Cart is Empty\nLooks like you haven't added any products to your cart yet."
            .to_string();
    }

    let mut out = String::from("Shopping Cart\n");
    for item in items {
        let _ = writeln!(
            out,
            "  {id:<12} {title:<28} {price:>10} x {qty:<3} {total:>10}",
            id = item.product.id.as_str(),
            title = item.product.title,
            price = item.product.price.to_string(),
            qty = item.quantity,
            total = item.line_total().to_string(),
        );
    }

    let _ = writeln!(out, "\nOrder Summary");
    let _ = writeln!(out, "  Items     {}", summary.item_count);
    let _ = writeln!(out, "  Subtotal  {}", summary.subtotal);
    let _ = writeln!(out, "  Shipping  Free");
    let _ = writeln!(out, "  Tax       {}", summary.tax);
    let _ = write!(out, "  Total     {}", summary.total);
    if user.is_none() {
        let _ = write!(out, "\n\nPlease login to proceed with checkout");
    }
    out
}

/// Render the wishlist page.
pub fn wishlist(entries: &[WishlistEntry]) -> String {
    if entries.is_empty() {
        return "Your Wishlist is Empty".to_string();
    }

    let mut out = format!("My Wishlist ({} items)\n", entries.len());
    for entry in entries {
        let product = entry.product();
        let _ = write!(
            out,
            "\n  {id:<12} {title:<28} {price:>10}",
            id = product.id.as_str(),
            title = product.title,
            price = product.price.to_string(),
        );
        if let Some(description) = &product.short_description {
            let _ = write!(out, "  {description}");
        }
    }
    out
}

/// Render the checkout summary.
pub fn checkout(summary: &CheckoutSummary) -> String {
    format!(
        "Checkout: {} item(s), total {}",
        summary.item_count, summary.total
    )
}
