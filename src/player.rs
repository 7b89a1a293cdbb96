//! Players seated at the table.

use alloc::string::String;
use core::fmt;

use crate::ids::fmt_token;

/// Opaque, stable identifier of a player for the life of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub(crate) u128);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_token(self.0, f)
    }
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Identifier assigned at initialization.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Whether this player currently holds the bank.
    is_dealer: bool,
    /// Rounds played; kept for callers that want to track it.
    rounds_played: u32,
}

impl Player {
    pub(crate) const fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            is_dealer: false,
            rounds_played: 0,
        }
    }

    /// Returns the player's identifier.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the player is the current dealer.
    #[must_use]
    pub const fn is_dealer(&self) -> bool {
        self.is_dealer
    }

    /// Returns the number of rounds played.
    #[must_use]
    pub const fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub(crate) const fn set_dealer(&mut self, is_dealer: bool) {
        self.is_dealer = is_dealer;
    }
}
