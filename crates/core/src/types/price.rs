//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog documents carry prices as plain JSON numbers (`"price": 19.99`),
//! and the cart mirror writes them back the same way, so [`Price`]
//! serializes as a number rather than the string form `rust_decimal` uses
//! by default.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price in the store currency.
///
/// Amounts are expected to be non-negative but are not validated; the
/// storefront passes whatever the catalog returned straight through.
/// Arithmetic saturates at [`Price::MAX`] instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable price; sums and line totals stop here.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the price reads back unchanged after being written
    /// as a JSON number, which is how saved carts and wishlists store it.
    #[must_use]
    pub fn survives_json_round_trip(&self) -> bool {
        serde_json::to_string(self)
            .ok()
            .and_then(|json| serde_json::from_str::<Self>(&json).ok())
            .is_some_and(|parsed| parsed == *self)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Format for display (e.g., "$19.99").
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
