//! Results returned by ledger operations.

use crate::money::Money;
use crate::player::PlayerId;

/// Who took the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandOutcome {
    /// The challenger beat the bank; money leaves the pot.
    ChallengerWins,
    /// The bank beat the challenger; money goes into the pot.
    DealerWins,
}

/// A single settled hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// The dealer holding the bank for this hand.
    pub dealer: PlayerId,
    /// The challenger.
    pub challenger: PlayerId,
    /// The winner.
    pub outcome: HandOutcome,
    /// Amount that changed hands.
    pub amount: Money,
}

/// Outcome of recording a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandReport {
    /// The hand as settled.
    pub settlement: Settlement,
    /// Pot after the hand (zero after a bust).
    pub pot_after: Money,
    /// The new dealer if the challenger broke the bank.
    pub busted_to: Option<PlayerId>,
    /// The new orbit number if this hand completed an orbit.
    pub orbit_completed: Option<u32>,
    /// Suggested next challenger, if the round continues.
    pub next_challenger: Option<PlayerId>,
}

impl HandReport {
    /// Returns `true` if the hand exhausted the pot and rotated the bank.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.busted_to.is_some()
    }
}

/// A player's net result over the game so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    /// The player.
    pub player: PlayerId,
    /// Money won minus money paid (antes, lost hands).
    pub net: Money,
}
