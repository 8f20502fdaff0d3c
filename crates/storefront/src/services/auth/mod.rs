//! Authentication service.
//!
//! Provides the credentials sign-in path and keeps the resulting session
//! in the durable mirror so it survives restarts.
//!
//! The session is deliberately independent of the cart and wishlist:
//! signing out, or signing in as someone else, leaves both untouched.

mod error;

pub use error::AuthError;

use std::sync::{PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};

use shopease_core::Email;

use crate::models::CurrentUser;
use crate::storage::PersistentBinding;

/// Persisted sign-in state.
#[derive(Debug)]
pub struct SessionStore {
    current: RwLock<Option<CurrentUser>>,
    mirror: PersistentBinding<Option<CurrentUser>>,
}

impl SessionStore {
    /// Restore the session from the durable mirror, if one was saved.
    #[must_use]
    pub fn load(mirror: PersistentBinding<Option<CurrentUser>>) -> Self {
        let current = mirror.load();
        if let Some(user) = &current {
            tracing::debug!(user_id = %user.id, "session restored");
        }
        Self {
            current: RwLock::new(current),
            mirror,
        }
    }

    /// Sign in with email and password.
    ///
    /// This is the demo credentials provider: any well-formed email with a
    /// non-empty password is accepted. A previous session is replaced.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidCredentials` if the password is empty.
    pub fn login(&self, email: &str, password: &SecretString) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;
        if password.expose_secret().is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = CurrentUser::from_credentials(email);
        {
            let mut current = self.write();
            *current = Some(user.clone());
            self.mirror.save(&*current);
        }
        tracing::info!(user_id = %user.id, name = %user.name, "signed in");
        Ok(user)
    }

    /// Sign out. Returns the user that was signed in, if any.
    pub fn logout(&self) -> Option<CurrentUser> {
        let previous = {
            let mut current = self.write();
            let previous = current.take();
            if previous.is_some() {
                self.mirror.clear();
            }
            previous
        };
        if let Some(user) = &previous {
            tracing::info!(user_id = %user.id, "signed out");
        }
        previous
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current(&self) -> Option<CurrentUser> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<CurrentUser>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}
