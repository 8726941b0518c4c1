//! UTXO set: the ledger's point-in-time state
//!
//! Each chain branch owns its own evolving snapshot; `clone` yields a
//! fully independent copy, so mutating one branch never leaks into a
//! sibling.

use crate::types::{Output, UtxoId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from unspent-output identity to output data.
///
/// Invariant: an entry present here has never been consumed on this
/// branch. Removing an entry models spending; inserting models
/// creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoSet {
    entries: HashMap<UtxoId, Output>,
}

impl UtxoSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, utxo: &UtxoId) -> bool {
        self.entries.contains_key(utxo)
    }

    pub fn get(&self, utxo: &UtxoId) -> Option<&Output> {
        self.entries.get(utxo)
    }

    pub fn put(&mut self, utxo: UtxoId, output: Output) {
        self.entries.insert(utxo, output);
    }

    pub fn remove(&mut self, utxo: &UtxoId) -> Option<Output> {
        self.entries.remove(utxo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UtxoId, &Output)> {
        self.entries.iter()
    }
}
