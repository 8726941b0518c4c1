//! Error types for ledger validation
//!
//! Every variant except `Malformed` is an expected, recoverable verdict
//! on untrusted input. Callers decide whether to retry, discard, or
//! request a different block; nothing here is fatal to the process.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("unknown parent block: {0}")]
    UnknownParent(String),

    #[error("stale fork: proposed height {proposed} at or below cutoff height {cutoff}")]
    StaleFork { proposed: u64, cutoff: u64 },

    #[error("input {input} claims a non-existent or already-spent output")]
    MissingUtxo { input: usize },

    #[error("invalid signature on input {input}")]
    InvalidSignature { input: usize },

    #[error("input {input} claims an output already claimed by this transaction")]
    DoubleClaim { input: usize },

    #[error("negative value {value} on output {output}")]
    NegativeOutput { output: usize, value: i64 },

    #[error("output total {output_total} exceeds input total {input_total}")]
    ValueConservation { input_total: i64, output_total: i64 },

    #[error("block not atomic: {accepted} of {proposed} transactions valid")]
    IncompleteBlock { accepted: usize, proposed: usize },

    #[error("malformed structure: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
