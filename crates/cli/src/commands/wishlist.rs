//! Wishlist commands.
//!
//! The wishlist store reports outcomes through notifications, so these
//! commands print nothing extra for add, remove and clear.

use shopease_core::{Product, ProductId};
use shopease_storefront::{AppContext, AppError};

use super::ProductArgs;
use crate::view;

/// Render the wishlist.
pub fn show(ctx: &AppContext) -> String {
    view::wishlist(&ctx.wishlist().items())
}

/// Save a product.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the product arguments are invalid.
pub fn add(ctx: &AppContext, args: ProductArgs) -> Result<String, AppError> {
    let product = Product::try_from(args)?;
    ctx.wishlist().add_to_wishlist(product);
    Ok(String::new())
}

/// Remove a saved product.
pub fn remove(ctx: &AppContext, id: &str) -> String {
    ctx.wishlist().remove_from_wishlist(&ProductId::from(id));
    String::new()
}

/// Remove every saved product.
pub fn clear(ctx: &AppContext) -> String {
    ctx.wishlist().clear_wishlist();
    String::new()
}

/// Add a saved product to the cart and drop it from the wishlist.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not on the wishlist.
pub fn move_to_cart(ctx: &AppContext, id: &str) -> Result<String, AppError> {
    let id = ProductId::from(id);
    if !ctx.move_to_cart(&id) {
        return Err(AppError::NotFound(format!("Wishlist item {id}")));
    }
    Ok(format!(
        "Moved {id} to cart ({} item(s) in cart)",
        ctx.cart().cart_count()
    ))
}
