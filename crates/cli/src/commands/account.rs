//! Session commands.

use secrecy::SecretString;
use shopease_storefront::{AppContext, AppError};

/// Sign in.
///
/// # Errors
///
/// Returns `AppError::Auth` if the credentials are rejected.
pub fn login(ctx: &AppContext, email: &str, password: String) -> Result<String, AppError> {
    let password = SecretString::from(password);
    let user = ctx.session().login(email, &password)?;
    Ok(format!("Welcome back to ShopEase, {}!", user.name))
}

/// Sign out.
pub fn logout(ctx: &AppContext) -> String {
    match ctx.session().logout() {
        Some(user) => format!("Signed out {}", user.email),
        None => "Not signed in".to_string(),
    }
}

/// Describe the current session.
pub fn whoami(ctx: &AppContext) -> String {
    match ctx.session().current() {
        Some(user) => format!("{} <{}>", user.name, user.email),
        None => "Not signed in".to_string(),
    }
}
