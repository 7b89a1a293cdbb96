//! Table configuration options.

use crate::money::Money;

/// House rules and presentation hints for a table.
///
/// None of these change what the ledger accepts; they shape the advice the
/// table gives to whatever drives it.
///
/// ```
/// use bankroll::{Money, TableOptions};
///
/// let options = TableOptions::default()
///     .with_all_in_requires_orbit(false)
///     .with_default_ante(Money::from_cents(50));
/// assert!(!options.all_in_requires_orbit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Whether the all-in shortcut stays unavailable until the first orbit
    /// against the current dealer is complete.
    pub all_in_requires_orbit: bool,
    /// Ante proposed to the operator during setup.
    pub default_ante: Money,
    /// Whether the next-challenger hint prefers players who have not yet
    /// played in the current orbit.
    pub hint_skips_played: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            all_in_requires_orbit: true,
            default_ante: Money::from_cents(20),
            hint_skips_played: false,
        }
    }
}

impl TableOptions {
    /// Sets whether all-in waits for a completed orbit.
    ///
    /// # Example
    ///
    /// ```
    /// use bankroll::TableOptions;
    ///
    /// let options = TableOptions::default().with_all_in_requires_orbit(false);
    /// assert_eq!(options.all_in_requires_orbit, false);
    /// ```
    #[must_use]
    pub const fn with_all_in_requires_orbit(mut self, required: bool) -> Self {
        self.all_in_requires_orbit = required;
        self
    }

    /// Sets the ante proposed during setup.
    ///
    /// # Example
    ///
    /// ```
    /// use bankroll::{Money, TableOptions};
    ///
    /// let options = TableOptions::default().with_default_ante(Money::from_cents(100));
    /// assert_eq!(options.default_ante.cents(), 100);
    /// ```
    #[must_use]
    pub const fn with_default_ante(mut self, ante: Money) -> Self {
        self.default_ante = ante;
        self
    }

    /// Sets whether the next-challenger hint skips players who already
    /// played this orbit.
    #[must_use]
    pub const fn with_hint_skips_played(mut self, skip: bool) -> Self {
        self.hint_skips_played = skip;
        self
    }
}
