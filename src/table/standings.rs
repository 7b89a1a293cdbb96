use alloc::vec::Vec;

use crate::history::LedgerEvent;
use crate::money::Money;
use crate::player::PlayerId;
use crate::report::{HandOutcome, Standing};

use super::TableState;

impl TableState {
    /// Tallies each player's net result from the log, in seat order.
    ///
    /// Antes count against every player, hands move money between the
    /// challenger and the pot, and a closed bank credits the dealer. The
    /// nets plus the current pot always sum to zero.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .players
            .iter()
            .map(|player| Standing {
                player: player.id(),
                net: Money::ZERO,
            })
            .collect();

        let mut credit = |id: PlayerId, delta: i64| {
            if let Some(standing) = standings.iter_mut().find(|s| s.player == id) {
                standing.net = Money::from_cents(standing.net.cents().saturating_add(delta));
            }
        };

        for entry in &self.logs {
            match *entry.event() {
                LedgerEvent::AnteCollected { per_player, .. } => {
                    for player in &self.players {
                        credit(player.id(), -per_player.cents());
                    }
                }
                LedgerEvent::HandSettled {
                    challenger,
                    outcome,
                    amount,
                    ..
                } => match outcome {
                    HandOutcome::ChallengerWins => credit(challenger, amount.cents()),
                    HandOutcome::DealerWins => credit(challenger, -amount.cents()),
                },
                LedgerEvent::BankClosed { dealer, amount, .. } => credit(dealer, amount.cents()),
                LedgerEvent::BankBusted { .. } | LedgerEvent::OrbitCompleted { .. } => {}
            }
        }

        standings
    }
}
