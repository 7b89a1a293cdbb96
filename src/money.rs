//! Fixed-point currency amounts.

use core::fmt;
use core::str::FromStr;

use crate::error::LedgerError;

#[cfg(feature = "std")]
fn round_half_away(value: f64) -> f64 {
    value.round()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_half_away(value: f64) -> f64 {
    libm::round(value)
}

/// A currency amount stored as whole minor units (cents).
///
/// Amounts are exact; the only rounding happens when converting from a
/// floating-point or decimal-text value, where `round(x * 100) / 100` is
/// applied once.
///
/// ```
/// use bankroll::Money;
///
/// let ante: Money = "0.20".parse().unwrap();
/// assert_eq!(ante.cents(), 20);
/// assert_eq!(ante.to_string(), "0.20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a major-unit value (e.g. `0.2`) to an amount, rounding to
    /// two decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] if the value is not finite or
    /// does not fit.
    pub fn from_major(value: f64) -> Result<Self, LedgerError> {
        if !value.is_finite() {
            return Err(LedgerError::InvalidAmount);
        }

        let cents = round_half_away(value * 100.0);
        #[expect(
            clippy::cast_precision_loss,
            reason = "bounds check only needs to be approximate at i64 extremes"
        )]
        let limit = i64::MAX as f64;
        if cents.abs() >= limit {
            return Err(LedgerError::InvalidAmount);
        }

        Ok(Self(cents as i64))
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns the negated amount.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtracts `rhs`, returning `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Multiplies by a count, returning `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, count: usize) -> Option<Self> {
        let count = i64::try_from(count).ok()?;
        self.0.checked_mul(count).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| LedgerError::InvalidAmount)?;
        Self::from_major(value)
    }
}
