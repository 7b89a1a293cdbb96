//! Table engine and state transitions.

use alloc::boxed::Box;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::sync::Mutex;

#[cfg(feature = "std")]
use crate::clock::SystemClock;
use crate::clock::{Clock, Timestamp};
use crate::error::LedgerError;
use crate::money::Money;
use crate::options::TableOptions;
use crate::player::{Player, PlayerId};
use crate::report::{HandOutcome, HandReport};

mod hand;
mod round;
mod standings;
pub mod state;
mod turn;

pub use state::TableState;

/// A scorekeeping table that serializes every operation on one game.
///
/// The table holds at most one [`TableState`]. Each operation takes the
/// current state, computes the next one, and stores it only on success, so
/// callers sharing a `Table` always observe whole transitions.
pub struct Table {
    /// House rules and hint settings.
    pub options: TableOptions,
    /// The game in progress, if any.
    state: Mutex<Option<TableState>>,
    /// Source of per-game identifier seeds.
    seeds: Mutex<ChaCha8Rng>,
    /// Time source for log entries.
    clock: Box<dyn Clock + Send + Sync>,
}

impl Table {
    /// Creates an empty table using the system clock.
    ///
    /// # Example
    ///
    /// ```
    /// use bankroll::{Money, Table, TableOptions};
    ///
    /// let table = Table::new(TableOptions::default(), 42);
    /// table.initialize(&["Ann", "Bo", "Cy"], Money::from_cents(20)).unwrap();
    /// assert!(table.is_active());
    /// ```
    #[cfg(feature = "std")]
    #[must_use]
    pub fn new(options: TableOptions, seed: u64) -> Self {
        Self::with_clock(options, seed, SystemClock)
    }

    /// Creates an empty table that stamps log entries with `clock`.
    #[must_use]
    pub fn with_clock<C>(options: TableOptions, seed: u64, clock: C) -> Self
    where
        C: Clock + Send + Sync + 'static,
    {
        Self {
            options,
            state: Mutex::new(None),
            seeds: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            clock: Box::new(clock),
        }
    }

    /// Starts a new game, replacing any game in progress.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidSetup`] if fewer than two names are
    /// given, a name is blank, or the ante is not positive.
    pub fn initialize<S: AsRef<str>>(&self, names: &[S], ante: Money) -> Result<(), LedgerError> {
        let seed = self.seeds.lock().next_u64();
        let state = TableState::initialize(names, ante, seed).inspect_err(|err| {
            log::warn!("initialize rejected: {err}");
        })?;

        log::info!(
            "game initialized: {} players, ante {ante}, {} deals first",
            state.players().len(),
            state.dealer().name()
        );
        *self.state.lock() = Some(state);
        Ok(())
    }

    /// Collects antes and opens a round for the current dealer.
    ///
    /// Returns the suggested first challenger.
    ///
    /// # Errors
    ///
    /// Returns an error if no game is active or a round is already active.
    pub fn start_round(&self) -> Result<Option<PlayerId>, LedgerError> {
        let skip_played = self.options.hint_skips_played;
        self.transition("start_round", |state, now| {
            let next = state.start_round(now)?;
            log::info!(
                "round started for {}: pot {}",
                next.dealer().name(),
                next.pot()
            );
            let hint = next.suggest_challenger(None, skip_played);
            Ok((next, hint))
        })
    }

    /// Settles a hand between the dealer and `challenger`.
    ///
    /// # Errors
    ///
    /// Returns an error if no game or round is active, the challenger is not
    /// a seated non-dealer, the amount is not positive, or a challenger win
    /// exceeds the pot.
    pub fn record_hand(
        &self,
        challenger: PlayerId,
        amount: Money,
        outcome: HandOutcome,
    ) -> Result<HandReport, LedgerError> {
        let skip_played = self.options.hint_skips_played;
        self.transition("record_hand", |state, now| {
            let (next, mut report) = state.record_hand(challenger, amount, outcome, now)?;
            log::debug!(
                "hand settled: {challenger} {outcome:?} {amount}, pot {}",
                report.pot_after
            );

            if let Some(new_dealer) = report.busted_to {
                log::info!(
                    "bank busted by {challenger}; {} takes the bank",
                    next.player(new_dealer).map_or("?", Player::name)
                );
            } else {
                if let Some(orbit) = report.orbit_completed {
                    log::debug!("orbit {orbit} begins for {}", next.dealer().name());
                }
                report.next_challenger = next.suggest_challenger(Some(challenger), skip_played);
            }

            Ok((next, report))
        })
    }

    /// The dealer collects the pot and the bank passes on.
    ///
    /// Returns the amount collected.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::GameNotActive`] if no game is active.
    pub fn close_bank(&self) -> Result<Money, LedgerError> {
        self.transition("close_bank", |state, now| {
            let collected = state.pot();
            let next = state.close_bank(now);
            log::info!(
                "{} closed the bank with {collected}; {} takes the bank",
                state.dealer().name(),
                next.dealer().name()
            );
            Ok((next, collected))
        })
    }

    /// Discards the game in progress, if any.
    pub fn exit(&self) {
        if let Some(state) = self.state.lock().take() {
            log::info!("game exited after {} log entries", state.logs().len());
            state.exit();
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> Option<TableState> {
        self.state.lock().clone()
    }

    /// Returns whether a game is in progress.
    pub fn is_active(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Returns whether the all-in shortcut should be offered.
    ///
    /// It needs an active round with money in the pot, and, under the
    /// default house rule, an orbit already completed against this dealer.
    pub fn all_in_available(&self) -> bool {
        self.state
            .lock()
            .as_ref()
            .is_some_and(|state| self.allows_all_in(state))
    }

    /// Returns the amount an all-in would take, when the shortcut is offered.
    pub fn all_in_amount(&self) -> Option<Money> {
        self.state
            .lock()
            .as_ref()
            .filter(|state| self.allows_all_in(state))
            .map(TableState::pot)
    }

    fn allows_all_in(&self, state: &TableState) -> bool {
        state.is_round_active()
            && state.pot().is_positive()
            && (!self.options.all_in_requires_orbit || state.dealer_round() > 1)
    }

    /// Suggests the next challenger after `after`, following the table's
    /// hint settings.
    pub fn suggested_challenger(&self, after: Option<PlayerId>) -> Option<PlayerId> {
        self.state
            .lock()
            .as_ref()
            .and_then(|state| state.suggest_challenger(after, self.options.hint_skips_played))
    }

    /// Runs one transition under the lock and keeps the result on success.
    fn transition<T, F>(&self, op: &str, apply: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&TableState, Timestamp) -> Result<(TableState, T), LedgerError>,
    {
        let mut slot = self.state.lock();
        let Some(current) = slot.as_ref() else {
            log::warn!("{op} rejected: {}", LedgerError::GameNotActive);
            return Err(LedgerError::GameNotActive);
        };

        match apply(current, self.clock.now()) {
            Ok((next, output)) => {
                debug_assert!(next.is_consistent(), "{op} produced an inconsistent table");
                *slot = Some(next);
                Ok(output)
            }
            Err(err) => {
                log::warn!("{op} rejected: {err}");
                Err(err)
            }
        }
    }
}
