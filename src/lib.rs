//! # ledger-core
//!
//! A single-ledger, fork-aware transaction validation and
//! chain-selection engine. Given a sequence of proposed blocks, it
//! maintains the set of unspent coin outputs, validates each
//! transaction against double-spend and signature rules, extends a tree
//! of candidate chains, and deterministically tracks the best (longest)
//! chain while bounding memory with a fork-depth cutoff.
//!
//! ## Architecture
//!
//! - [`utxo::UtxoSet`]: the ledger's point-in-time state, one
//!   independent snapshot per branch
//! - [`validator`]: pure checks of a transaction against a given
//!   snapshot, plus batch application
//! - [`mempool::PendingPool`]: unordered holding area for transactions
//!   awaiting block inclusion
//! - [`chain::ChainTree`]: the block tree, fork choice, and cutoff-age
//!   pruning
//!
//! This crate is a library with no wire protocol or CLI. Proof-of-work
//! and block propagation are the caller's concern: blocks handed to
//! [`ChainTree::add_block`] are assumed structurally well-formed, and
//! only their transactions and chain position are validated here.
//!
//! ## Usage
//!
//! ```rust
//! use ledger_core::{Block, ChainTree, Transaction};
//!
//! let coinbase = Transaction::coinbase(10, vec![2u8; 33]);
//! let mut genesis = Block::genesis(coinbase);
//! genesis.finalize();
//!
//! let tree = ChainTree::new(genesis).unwrap();
//! assert_eq!(tree.best_height(), 1);
//! assert_eq!(tree.best_snapshot().len(), 1);
//! ```

pub mod chain;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod mempool;
pub mod types;
pub mod utxo;
pub mod validator;

// Re-export commonly used types
pub use chain::ChainTree;
pub use constants::*;
pub use error::{LedgerError, Result};
pub use mempool::PendingPool;
pub use types::{Amount, Block, Hash, Input, Output, PubKeyBytes, Transaction, UtxoId};
pub use utxo::UtxoSet;
