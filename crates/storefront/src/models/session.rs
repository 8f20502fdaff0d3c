//! Session-related types.
//!
//! Types stored in the session mirror for authentication state.

use serde::{Deserialize, Serialize};

use shopease_core::{Email, UserId};

/// The signed-in shopper.
///
/// Gates the checkout entry point and supplies the name shown in the
/// navigation bar. The cart and wishlist never read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account ID issued by the sign-in provider.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Sign-in email address.
    pub email: Email,
}

impl CurrentUser {
    /// Build the identity for a credentials sign-in: the demo provider
    /// issues a fixed account ID and names the user after their email.
    #[must_use]
    pub fn from_credentials(email: Email) -> Self {
        Self {
            id: UserId::new(DEMO_ACCOUNT_ID),
            name: email.display_name().to_owned(),
            email,
        }
    }
}

/// Account ID issued by the credentials provider to every sign-in.
pub const DEMO_ACCOUNT_ID: &str = "1";
