//! Unified error handling.
//!
//! The stores themselves never fail; these errors come from the
//! collaborators around them (configuration, opening storage, sign-in,
//! checkout) and are what the binary reports to the user.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Sign-in failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout could not start.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Message safe to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Storage(_) => "Storefront is unavailable".to_string(),
            Self::Auth(AuthError::InvalidEmail(_)) => "Invalid email address".to_string(),
            Self::Auth(AuthError::InvalidCredentials) => "Invalid email or password".to_string(),
            Self::Checkout(CheckoutError::LoginRequired) => "Please login to checkout".to_string(),
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty".to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(reason) => reason.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("price must be a number".to_string());
        assert_eq!(err.to_string(), "Bad request: price must be a number");
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = AppError::from(StorageError::InvalidKey("x y".to_string()));
        assert_eq!(err.user_message(), "Storefront is unavailable");

        let err = AppError::from(AuthError::InvalidCredentials);
        assert_eq!(err.user_message(), "Invalid email or password");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.user_message(), "Your cart is empty");

        let err = AppError::NotFound("Product".to_string());
        assert_eq!(err.user_message(), "Product not found");
    }
}
