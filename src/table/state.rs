//! The table state value.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

use crate::clock::Timestamp;
use crate::error::{LedgerError, SetupProblem};
use crate::history::{EntryId, LedgerEvent, LogEntry};
use crate::ids::IdSource;
use crate::money::Money;
use crate::player::{Player, PlayerId};
use crate::report::HandOutcome;

/// Everything the ledger knows about a game in progress.
///
/// A `TableState` is a value: every operation borrows the current state and
/// returns a new one, so a rejected operation leaves the original exactly as
/// it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// Players in turn order.
    pub(super) players: Vec<Player>,
    /// Money currently in the bank.
    pub(super) pot: Money,
    /// Ante per player per round.
    pub(super) ante: Money,
    /// Player holding the bank.
    pub(super) current_dealer: PlayerId,
    /// Whether antes are in and hands may be played.
    pub(super) round_active: bool,
    /// Log in creation order.
    pub(super) logs: Vec<LogEntry>,
    /// Orbit counter for the current dealer, starting at 1.
    pub(super) dealer_round: u32,
    /// Challengers who have played in the current orbit.
    pub(super) played_this_round: HashSet<PlayerId>,
    /// Timestamp of the newest entry.
    last_timestamp: Timestamp,
    ids: IdSource,
}

impl TableState {
    /// Seats the players in the given order and makes the first the dealer.
    ///
    /// Names are trimmed. `seed` drives identifier generation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidSetup`] if fewer than two names are
    /// given, a name is blank, or the ante is not positive.
    pub fn initialize<S: AsRef<str>>(
        names: &[S],
        ante: Money,
        seed: u64,
    ) -> Result<Self, LedgerError> {
        if names.len() < 2 {
            return Err(SetupProblem::TooFewPlayers.into());
        }
        if names.iter().any(|name| name.as_ref().trim().is_empty()) {
            return Err(SetupProblem::BlankName.into());
        }
        if !ante.is_positive() {
            return Err(SetupProblem::NonPositiveAnte.into());
        }

        let mut ids = IdSource::new(seed);
        let mut players: Vec<Player> = names
            .iter()
            .map(|name| Player::new(PlayerId(ids.next_token()), name.as_ref().trim().to_string()))
            .collect();
        players[0].set_dealer(true);
        let current_dealer = players[0].id();

        Ok(Self {
            players,
            pot: Money::ZERO,
            ante,
            current_dealer,
            round_active: false,
            logs: Vec::new(),
            dealer_round: 1,
            played_this_round: HashSet::new(),
            last_timestamp: Timestamp::default(),
            ids,
        })
    }

    /// Discards the game.
    pub fn exit(self) {
        drop(self);
    }

    /// Returns the players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Looks up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id() == id)
    }

    /// Returns the player holding the bank.
    #[must_use]
    pub fn dealer(&self) -> &Player {
        &self.players[self.dealer_index()]
    }

    /// Returns the current dealer's identifier.
    #[must_use]
    pub const fn dealer_id(&self) -> PlayerId {
        self.current_dealer
    }

    /// Returns the money in the pot.
    #[must_use]
    pub const fn pot(&self) -> Money {
        self.pot
    }

    /// Returns the ante per player.
    #[must_use]
    pub const fn ante(&self) -> Money {
        self.ante
    }

    /// Returns whether a round is active.
    #[must_use]
    pub const fn is_round_active(&self) -> bool {
        self.round_active
    }

    /// Returns the orbit number for the current dealer.
    #[must_use]
    pub const fn dealer_round(&self) -> u32 {
        self.dealer_round
    }

    /// Returns the challengers who have played this orbit, in turn order.
    #[must_use]
    pub fn played_this_round(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .map(Player::id)
            .filter(|id| self.played_this_round.contains(id))
            .collect()
    }

    /// Returns whether `id` has played in the current orbit.
    #[must_use]
    pub fn has_played(&self, id: PlayerId) -> bool {
        self.played_this_round.contains(&id)
    }

    /// Returns the log in creation order.
    #[must_use]
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Returns the log newest first, the way it is usually displayed.
    pub fn logs_recent_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.logs.iter().rev()
    }

    /// Returns whether `id` is a seated player other than the dealer.
    #[must_use]
    pub fn is_challenger(&self, id: PlayerId) -> bool {
        id != self.current_dealer && self.player(id).is_some()
    }

    /// Checks the structural invariants of the table.
    ///
    /// Exactly one dealer matching the dealer id, a non-negative pot, an
    /// orbit counter of at least one, and a played set made of challengers
    /// only.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut dealers = self.players.iter().filter(|player| player.is_dealer());
        let single_dealer = matches!(
            (dealers.next(), dealers.next()),
            (Some(dealer), None) if dealer.id() == self.current_dealer
        );

        single_dealer
            && self.pot >= Money::ZERO
            && self.dealer_round >= 1
            && self.played_this_round.len() < self.players.len()
            && self
                .played_this_round
                .iter()
                .all(|&id| self.is_challenger(id))
            && self
                .logs
                .windows(2)
                .all(|pair| pair[0].timestamp() <= pair[1].timestamp())
    }

    /// Renders a log entry as an English sentence using the roster names.
    #[must_use]
    pub fn describe(&self, entry: &LogEntry) -> String {
        match *entry.event() {
            LedgerEvent::AnteCollected {
                dealer,
                players,
                per_player,
                total,
            } => format!(
                "{} opens the bank: {players} antes of {per_player}, {total} in the pot",
                self.name_of(dealer)
            ),
            LedgerEvent::HandSettled {
                dealer,
                challenger,
                outcome: HandOutcome::DealerWins,
                amount,
            } => format!(
                "{} beats {} and takes {amount}",
                self.name_of(dealer),
                self.name_of(challenger)
            ),
            LedgerEvent::HandSettled {
                dealer,
                challenger,
                outcome: HandOutcome::ChallengerWins,
                amount,
            } => format!(
                "{} beats {} and takes {amount} from the pot",
                self.name_of(challenger),
                self.name_of(dealer)
            ),
            LedgerEvent::BankBusted {
                dealer,
                challenger,
                amount,
                next_dealer,
            } => format!(
                "{} broke {}'s bank with {amount}; {} takes the bank",
                self.name_of(challenger),
                self.name_of(dealer),
                self.name_of(next_dealer)
            ),
            LedgerEvent::BankClosed {
                dealer,
                amount,
                next_dealer,
            } => format!(
                "{} closes the bank and collects {amount}; {} takes the bank",
                self.name_of(dealer),
                self.name_of(next_dealer)
            ),
            LedgerEvent::OrbitCompleted { dealer, orbit } => format!(
                "Everyone has played {}; orbit {orbit} begins",
                self.name_of(dealer)
            ),
        }
    }

    fn name_of(&self, id: PlayerId) -> &str {
        self.player(id).map_or("?", Player::name)
    }

    pub(super) fn dealer_index(&self) -> usize {
        self.players
            .iter()
            .position(|player| player.id() == self.current_dealer)
            .unwrap_or(0)
    }

    /// Appends an event, never stamping it earlier than the newest entry.
    pub(super) fn push_event(&mut self, event: LedgerEvent, at: Timestamp) {
        let timestamp = at.max(self.last_timestamp);
        let id = EntryId(self.ids.next_token());
        self.logs.push(LogEntry::new(id, timestamp, event));
        self.last_timestamp = timestamp;
    }
}
