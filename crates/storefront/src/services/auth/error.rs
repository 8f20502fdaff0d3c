//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during sign-in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] shopease_core::EmailError),

    /// Missing password or otherwise rejected credentials.
    #[error("invalid credentials")]
    InvalidCredentials,
}
