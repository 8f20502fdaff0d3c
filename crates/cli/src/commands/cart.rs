//! Cart commands.
//!
//! The cart store reports nothing on its own, so each command describes
//! what happened in its output.

use shopease_core::{Product, ProductId};
use shopease_storefront::services::checkout::CheckoutSummary;
use shopease_storefront::{AppContext, AppError};

use super::ProductArgs;
use crate::view;

/// Render the cart.
pub fn show(ctx: &AppContext) -> String {
    let items = ctx.cart().items();
    let summary = CheckoutSummary::for_items(&items);
    let user = ctx.session().current();
    view::cart(&items, &summary, user.as_ref())
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the product arguments are invalid.
pub fn add(ctx: &AppContext, args: ProductArgs) -> Result<String, AppError> {
    let product = Product::try_from(args)?;
    let title = product.title.clone();
    ctx.cart().add_to_cart(product);
    Ok(format!(
        "Added {title} to cart ({} item(s) in cart)",
        ctx.cart().cart_count()
    ))
}

/// Set a line's quantity.
pub fn update(ctx: &AppContext, id: &str, quantity: i64) -> String {
    let id = ProductId::from(id);
    if ctx.cart().get(&id).is_none() {
        return format!("{id} is not in the cart");
    }
    ctx.cart().update_quantity(&id, quantity);
    match ctx.cart().get(&id) {
        Some(line) => format!("{id} quantity set to {}", line.quantity),
        None => format!("Removed {id} from cart"),
    }
}

/// Remove a line.
pub fn remove(ctx: &AppContext, id: &str) -> String {
    let id = ProductId::from(id);
    let present = ctx.cart().get(&id).is_some();
    ctx.cart().remove_from_cart(&id);
    if present {
        format!("Removed {id} from cart")
    } else {
        format!("{id} is not in the cart")
    }
}

/// Empty the cart.
pub fn clear(ctx: &AppContext) -> String {
    ctx.cart().clear_cart();
    "Cart cleared".to_string()
}
