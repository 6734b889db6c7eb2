//! Adapters for external collaborators.

pub mod ledger;
pub mod word_source;

pub use ledger::{InMemoryLedger, LedgerEntry, LedgerError, RankedLedger};
pub use word_source::{FixedWordSource, HttpWordSource, WordSource, FALLBACK_WORD};
