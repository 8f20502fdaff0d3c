//! Collaborators that sit beside the stores.
//!
//! # Services
//!
//! - `auth` - Credentials sign-in and the persisted session
//! - `checkout` - Checkout entry gate over the session and cart

pub mod auth;
pub mod checkout;
