//! Pending transaction pool
//!
//! An unordered holding area for transactions not yet included in any
//! block. Membership is advisory for an external block assembler; no
//! validation happens here; that runs only when a transaction is
//! embedded in a block and passed through the chain tree.

use crate::types::{Hash, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingPool {
    txs: HashMap<Hash, Transaction>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finalized transaction, keyed by its content hash.
    /// Re-adding the same transaction replaces it.
    pub fn add(&mut self, tx: Transaction) {
        self.txs.insert(tx.hash(), tx);
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.txs.contains_key(hash)
    }

    pub fn get(&self, hash: &Hash) -> Option<&Transaction> {
        self.txs.get(hash)
    }

    /// Advisory removal for an external miner dropping mined
    /// transactions; the core never calls this.
    pub fn remove(&mut self, hash: &Hash) -> Option<Transaction> {
        self.txs.remove(hash)
    }

    /// Full read for block assembly, in no particular order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.txs.values()
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}
