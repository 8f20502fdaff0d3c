//! Checkout command.

use shopease_storefront::{AppContext, AppError};

use crate::view;

/// Start checkout for the signed-in shopper.
///
/// # Errors
///
/// Returns `AppError::Checkout` if nobody is signed in or the cart is empty.
pub fn run(ctx: &AppContext) -> Result<String, AppError> {
    let summary = ctx.begin_checkout()?;
    Ok(view::checkout(&summary))
}
