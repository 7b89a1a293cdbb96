use crate::clock::Timestamp;
use crate::error::LedgerError;
use crate::history::LedgerEvent;
use crate::money::Money;
use crate::player::PlayerId;
use crate::report::{HandOutcome, HandReport, Settlement};

use super::TableState;

impl TableState {
    /// Settles one hand between the bank and a challenger.
    ///
    /// A challenger win that empties the pot breaks the bank: the hand and
    /// the bust are logged and the bank moves to the next seat straight away,
    /// without orbit bookkeeping. Any other hand marks the challenger as
    /// having played; once every challenger has, a new orbit begins.
    ///
    /// # Errors
    ///
    /// Returns an error if no round is active, `challenger` is not a seated
    /// non-dealer, `amount` is not positive, or a challenger win asks for
    /// more than the pot holds.
    pub fn record_hand(
        &self,
        challenger: PlayerId,
        amount: Money,
        outcome: HandOutcome,
        at: Timestamp,
    ) -> Result<(Self, HandReport), LedgerError> {
        if !self.round_active {
            return Err(LedgerError::NoActiveRound);
        }
        if !self.is_challenger(challenger) {
            return Err(LedgerError::InvalidChallenger);
        }
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }

        let dealer = self.current_dealer;
        let pot_after = match outcome {
            HandOutcome::ChallengerWins => {
                if amount > self.pot {
                    return Err(LedgerError::InsufficientPot);
                }
                self.pot.checked_sub(amount)
            }
            HandOutcome::DealerWins => self.pot.checked_add(amount),
        }
        .ok_or(LedgerError::InvalidAmount)?;

        let settlement = Settlement {
            dealer,
            challenger,
            outcome,
            amount,
        };
        let mut next = self.clone();
        next.pot = pot_after;
        next.push_event(
            LedgerEvent::HandSettled {
                dealer,
                challenger,
                outcome,
                amount,
            },
            at,
        );

        if outcome == HandOutcome::ChallengerWins && pot_after.is_zero() {
            let next_dealer = next.rotate_dealer();
            next.push_event(
                LedgerEvent::BankBusted {
                    dealer,
                    challenger,
                    amount,
                    next_dealer,
                },
                at,
            );
            let report = HandReport {
                settlement,
                pot_after: Money::ZERO,
                busted_to: Some(next_dealer),
                orbit_completed: None,
                next_challenger: None,
            };
            return Ok((next, report));
        }

        let orbit_completed = next.mark_played(challenger, at);
        let next_challenger = next.next_challenger(Some(challenger));
        let report = HandReport {
            settlement,
            pot_after,
            busted_to: None,
            orbit_completed,
            next_challenger,
        };

        Ok((next, report))
    }

    /// Records that `challenger` has faced the bank this orbit and rolls the
    /// orbit over once everyone has. Returns the new orbit number if it did.
    fn mark_played(&mut self, challenger: PlayerId, at: Timestamp) -> Option<u32> {
        self.played_this_round.insert(challenger);
        if self.played_this_round.len() < self.players.len() - 1 {
            return None;
        }

        self.dealer_round += 1;
        self.played_this_round.clear();
        self.push_event(
            LedgerEvent::OrbitCompleted {
                dealer: self.current_dealer,
                orbit: self.dealer_round,
            },
            at,
        );

        Some(self.dealer_round)
    }
}
