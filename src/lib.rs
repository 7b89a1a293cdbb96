//! A scorekeeping ledger for card games played against a rotating bank,
//! with optional `no_std` support.
//!
//! One player holds the bank while the others challenge it in turn. The
//! crate tracks the pot, ante collection, every hand settled between the
//! bank and a challenger, orbits of challengers, and the rotation of the
//! bank, and keeps a structured log of it all. It does not judge the cards;
//! whoever keeps score enters the outcome of each hand.
//!
//! [`TableState`] is the pure state machine: every operation borrows a state
//! and returns a new one. [`Table`] wraps it behind a lock for callers that
//! share one game.
//!
//! # Example
//!
//! ```
//! use bankroll::{HandOutcome, Money, Table, TableOptions};
//!
//! let table = Table::new(TableOptions::default(), 7);
//! table.initialize(&["A", "B", "C"], Money::from_cents(20)).unwrap();
//!
//! let first = table.start_round().unwrap().unwrap();
//! let report = table
//!     .record_hand(first, Money::from_cents(20), HandOutcome::DealerWins)
//!     .unwrap();
//! assert_eq!(report.pot_after, Money::from_cents(80));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod clock;
pub mod error;
pub mod history;
mod ids;
pub mod money;
pub mod options;
pub mod player;
pub mod report;
mod sync;
pub mod table;

// Re-export main types
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock, Timestamp};
pub use error::{LedgerError, SetupProblem};
pub use history::{EntryId, LedgerEvent, LogEntry, LogKind};
pub use money::Money;
pub use options::TableOptions;
pub use player::{Player, PlayerId};
pub use report::{HandOutcome, HandReport, Settlement, Standing};
pub use table::{Table, TableState};
