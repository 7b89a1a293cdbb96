//! Structured transaction log.

use core::fmt;

use crate::clock::Timestamp;
use crate::ids::fmt_token;
use crate::money::Money;
use crate::player::PlayerId;
use crate::report::HandOutcome;

/// Identifier of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub(crate) u128);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_token(self.0, f)
    }
}

/// Category of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    /// Antes paid into the pot.
    Ante,
    /// Money entered the pot from a challenger.
    Win,
    /// Money left the pot to a challenger.
    Loss,
    /// The dealer took the pot.
    Collect,
    /// Informational; no money moved.
    Info,
}

/// What happened, independent of how it is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Every player paid the ante at the start of a dealer's round.
    AnteCollected {
        /// Dealer whose round began.
        dealer: PlayerId,
        /// Number of players who paid.
        players: usize,
        /// Ante per player.
        per_player: Money,
        /// Total added to the pot.
        total: Money,
    },
    /// A hand between the bank and a challenger was settled.
    HandSettled {
        /// Dealer.
        dealer: PlayerId,
        /// Challenger.
        challenger: PlayerId,
        /// Who won.
        outcome: HandOutcome,
        /// Unsigned amount that changed hands.
        amount: Money,
    },
    /// A challenger took the rest of the pot and the bank passed on.
    BankBusted {
        /// Dealer who lost the bank.
        dealer: PlayerId,
        /// Challenger who emptied the pot.
        challenger: PlayerId,
        /// Unsigned amount of the final hand.
        amount: Money,
        /// Player now holding the bank.
        next_dealer: PlayerId,
    },
    /// The dealer took what was left and passed the bank on.
    BankClosed {
        /// Dealer who collected.
        dealer: PlayerId,
        /// Amount collected, possibly zero.
        amount: Money,
        /// Player now holding the bank.
        next_dealer: PlayerId,
    },
    /// Every challenger has played once against the dealer.
    OrbitCompleted {
        /// Dealer still holding the bank.
        dealer: PlayerId,
        /// Number of the orbit that begins now.
        orbit: u32,
    },
}

impl LedgerEvent {
    /// Returns the category of this event.
    #[must_use]
    pub const fn kind(&self) -> LogKind {
        match self {
            Self::AnteCollected { .. } => LogKind::Ante,
            Self::HandSettled {
                outcome: HandOutcome::DealerWins,
                ..
            } => LogKind::Win,
            Self::HandSettled {
                outcome: HandOutcome::ChallengerWins,
                ..
            }
            | Self::BankBusted { .. } => LogKind::Loss,
            Self::BankClosed { .. } => LogKind::Collect,
            Self::OrbitCompleted { .. } => LogKind::Info,
        }
    }

    /// Returns the signed amount seen from the pot: positive when money
    /// went in or was collected, negative when it went to a challenger.
    #[must_use]
    pub const fn amount(&self) -> Option<Money> {
        match *self {
            Self::AnteCollected { total, .. } => Some(total),
            Self::HandSettled {
                outcome: HandOutcome::DealerWins,
                amount,
                ..
            }
            | Self::BankClosed { amount, .. } => Some(amount),
            Self::HandSettled {
                outcome: HandOutcome::ChallengerWins,
                amount,
                ..
            }
            | Self::BankBusted { amount, .. } => Some(amount.negated()),
            Self::OrbitCompleted { .. } => None,
        }
    }
}

/// An entry in the table's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    id: EntryId,
    timestamp: Timestamp,
    event: LedgerEvent,
}

impl LogEntry {
    pub(crate) const fn new(id: EntryId, timestamp: Timestamp, event: LedgerEvent) -> Self {
        Self {
            id,
            timestamp,
            event,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// Returns when the entry was written.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Returns the recorded event.
    #[must_use]
    pub const fn event(&self) -> &LedgerEvent {
        &self.event
    }

    /// Returns the entry category.
    #[must_use]
    pub const fn kind(&self) -> LogKind {
        self.event.kind()
    }

    /// Returns the signed amount, if any.
    #[must_use]
    pub const fn amount(&self) -> Option<Money> {
        self.event.amount()
    }
}
