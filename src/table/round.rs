use crate::clock::Timestamp;
use crate::error::LedgerError;
use crate::history::LedgerEvent;
use crate::money::Money;
use crate::player::PlayerId;

use super::TableState;

impl TableState {
    /// Collects the ante from every player and opens the round.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RoundAlreadyActive`] if a round is underway, or
    /// [`LedgerError::InvalidAmount`] if the pot would overflow.
    pub fn start_round(&self, at: Timestamp) -> Result<Self, LedgerError> {
        if self.round_active {
            return Err(LedgerError::RoundAlreadyActive);
        }

        let players = self.players.len();
        let total = self
            .ante
            .checked_mul(players)
            .ok_or(LedgerError::InvalidAmount)?;
        let pot = self
            .pot
            .checked_add(total)
            .ok_or(LedgerError::InvalidAmount)?;

        let mut next = self.clone();
        next.pot = pot;
        next.round_active = true;
        next.push_event(
            LedgerEvent::AnteCollected {
                dealer: self.current_dealer,
                players,
                per_player: self.ante,
                total,
            },
            at,
        );

        Ok(next)
    }

    /// The dealer keeps whatever is in the pot and passes the bank on.
    ///
    /// Allowed whether or not a round is active; with no round the dealer
    /// collects nothing.
    #[must_use]
    pub fn close_bank(&self, at: Timestamp) -> Self {
        let mut next = self.clone();
        let dealer = self.current_dealer;
        let amount = self.pot;
        let next_dealer = next.rotate_dealer();
        next.push_event(
            LedgerEvent::BankClosed {
                dealer,
                amount,
                next_dealer,
            },
            at,
        );

        next
    }

    /// Passes the bank to the next seat and resets the per-dealer counters.
    ///
    /// Returns the new dealer.
    pub(super) fn rotate_dealer(&mut self) -> PlayerId {
        let old = self.dealer_index();
        let new = (old + 1) % self.players.len();

        self.players[old].set_dealer(false);
        self.players[new].set_dealer(true);
        self.current_dealer = self.players[new].id();
        self.pot = Money::ZERO;
        self.round_active = false;
        self.dealer_round = 1;
        self.played_this_round.clear();

        self.current_dealer
    }
}
