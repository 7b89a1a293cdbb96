//! Error types for ledger operations.

use thiserror::Error;

/// Reasons a roster or ante is rejected at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupProblem {
    /// Fewer than two names were supplied.
    #[error("at least two players are required")]
    TooFewPlayers,
    /// A name was empty or whitespace only.
    #[error("player names must not be blank")]
    BlankName,
    /// The ante was zero or negative.
    #[error("ante must be positive")]
    NonPositiveAnte,
}

/// Errors that can occur while operating the ledger.
///
/// Every operation either produces a new state or fails with one of these,
/// leaving the previous state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The roster or ante given to `initialize` is unusable.
    #[error("invalid setup: {0}")]
    InvalidSetup(SetupProblem),
    /// No game has been initialized, or it has been exited.
    #[error("no game is active")]
    GameNotActive,
    /// A hand was recorded while no round is active.
    #[error("no round is active")]
    NoActiveRound,
    /// A round was started while one is already active.
    #[error("a round is already active")]
    RoundAlreadyActive,
    /// The challenger is unknown or is the current dealer.
    #[error("challenger is not a known non-dealer player")]
    InvalidChallenger,
    /// The amount is not a positive, representable currency amount.
    #[error("amount must be a positive finite number")]
    InvalidAmount,
    /// The challenger asked for more than the pot holds.
    #[error("amount exceeds the pot")]
    InsufficientPot,
}

impl From<SetupProblem> for LedgerError {
    fn from(problem: SetupProblem) -> Self {
        Self::InvalidSetup(problem)
    }
}
