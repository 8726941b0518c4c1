//! Fork-aware chain tree with per-branch UTXO snapshots
//!
//! Nodes live in an arena keyed by block hash; parent links are lookup
//! keys, never owning references, so the bidirectional structure has no
//! ownership cycle. All mutation funnels through [`ChainTree::add_block`],
//! which takes `&mut self`; the borrow checker serializes it, matching
//! the single-writer model: parent lookup, validation, snapshot
//! mutation, node insertion, and the best-pointer update form one
//! uninterleaved critical section.

use crate::constants::{CUTOFF_AGE, GENESIS_HEIGHT};
use crate::error::{LedgerError, Result};
use crate::mempool::PendingPool;
use crate::types::{Block, Hash, Transaction};
use crate::utxo::UtxoSet;
use crate::validator::{apply_batch, apply_transaction};
use std::collections::{HashMap, HashSet};

/// A block attached to the tree, owning the UTXO snapshot that results
/// from applying its transactions and coinbase on top of its parent's
/// snapshot. Never mutated after insertion except for gaining children.
#[derive(Debug)]
struct ChainNode {
    block: Block,
    parent: Option<Hash>,
    children: HashSet<Hash>,
    height: u64,
    snapshot: UtxoSet,
}

/// Tree of candidate chains with a deterministic best-chain pointer
/// (strictly greatest height, first seen on ties) and a cutoff-age
/// bound on how far behind the best chain a new block may attach.
#[derive(Debug)]
pub struct ChainTree {
    nodes: HashMap<Hash, ChainNode>,
    best: Hash,
    pool: PendingPool,
}

impl ChainTree {
    /// Create a tree holding just `genesis` at height 1.
    ///
    /// The genesis block is assumed valid: its transactions are not
    /// validated, and only its coinbase outputs seed the UTXO set.
    pub fn new(genesis: Block) -> Result<Self> {
        if genesis.prev_block_hash.is_some() {
            return Err(LedgerError::Malformed(
                "genesis block must not name a parent".to_string(),
            ));
        }

        let mut snapshot = UtxoSet::new();
        apply_transaction(&genesis.coinbase, &mut snapshot);

        let hash = genesis.hash();
        let node = ChainNode {
            block: genesis,
            parent: None,
            children: HashSet::new(),
            height: GENESIS_HEIGHT,
            snapshot,
        };

        let mut nodes = HashMap::new();
        nodes.insert(hash, node);
        Ok(Self {
            nodes,
            best: hash,
            pool: PendingPool::new(),
        })
    }

    /// Validate `block` against its parent's snapshot and attach it.
    ///
    /// Rejects without mutating the tree when the parent is unknown,
    /// when any transaction fails validation (a block is atomic), or
    /// when the proposed height falls at or below
    /// `best_height - CUTOFF_AGE`. On acceptance the coinbase outputs
    /// are minted unconditionally, the node is registered for lookup by
    /// its block hash, and the best pointer advances only on strictly
    /// greater height. Whenever the best pointer advances, branches
    /// that can no longer be extended are evicted.
    pub fn add_block(&mut self, block: Block) -> Result<()> {
        let prev = block.prev_block_hash.ok_or_else(|| {
            LedgerError::UnknownParent("block carries no parent hash".to_string())
        })?;

        let (parent_height, mut snapshot) = match self.nodes.get(&prev) {
            Some(parent) => (parent.height, parent.snapshot.clone()),
            None => return Err(LedgerError::UnknownParent(short_hex(&prev))),
        };

        // All-or-nothing: any invalid transaction rejects the whole
        // block, even though the batch validator tolerates subsets.
        // Only the local clone has been touched at this point.
        let accepted = apply_batch(&block.transactions, &mut snapshot);
        if accepted.len() != block.transactions.len() {
            return Err(LedgerError::IncompleteBlock {
                accepted: accepted.len(),
                proposed: block.transactions.len(),
            });
        }

        let proposed_height = parent_height + 1;
        let best_height = self.best_height();
        if proposed_height + CUTOFF_AGE <= best_height {
            return Err(LedgerError::StaleFork {
                proposed: proposed_height,
                cutoff: best_height - CUTOFF_AGE,
            });
        }

        // Coinbase outputs mint value; they are never validated
        // against prior inputs.
        apply_transaction(&block.coinbase, &mut snapshot);

        let hash = block.hash();
        let node = ChainNode {
            block,
            parent: Some(prev),
            children: HashSet::new(),
            height: proposed_height,
            snapshot,
        };
        self.nodes.insert(hash, node);
        if let Some(parent) = self.nodes.get_mut(&prev) {
            parent.children.insert(hash);
        }

        if proposed_height > best_height {
            self.best = hash;
            self.evict_stale();
        }
        Ok(())
    }

    /// Current maximum-height block
    pub fn best_block(&self) -> &Block {
        &self.nodes[&self.best].block
    }

    /// Height of the best chain
    pub fn best_height(&self) -> u64 {
        self.nodes[&self.best].height
    }

    /// Defensive copy of the best node's UTXO snapshot, for miners
    /// assembling a block on top of it
    pub fn best_snapshot(&self) -> UtxoSet {
        self.nodes[&self.best].snapshot.clone()
    }

    pub fn contains_block(&self, hash: &Hash) -> bool {
        self.nodes.contains_key(hash)
    }

    pub fn height_of(&self, hash: &Hash) -> Option<u64> {
        self.nodes.get(hash).map(|node| node.height)
    }

    /// Number of nodes currently retained
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a transaction to the pending pool
    pub fn add_transaction(&mut self, tx: Transaction) {
        self.pool.add(tx);
    }

    pub fn pending_pool(&self) -> &PendingPool {
        &self.pool
    }

    pub fn pending_pool_mut(&mut self) -> &mut PendingPool {
        &mut self.pool
    }

    /// Evict every node whose height is at or below
    /// `best_height - CUTOFF_AGE`, detaching it from its parent's child
    /// set so no orphaned subtree is retained. Such nodes are
    /// unreachable for future consensus: extending them is already
    /// rejected by the cutoff rule or requires a parent this pass
    /// removes.
    fn evict_stale(&mut self) {
        let cutoff = self.best_height().saturating_sub(CUTOFF_AGE);
        if cutoff == 0 {
            return;
        }

        let stale: Vec<Hash> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.height <= cutoff)
            .map(|(hash, _)| *hash)
            .collect();

        for hash in &stale {
            if let Some(node) = self.nodes.remove(hash) {
                if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
                    parent.children.remove(hash);
                }
                // surviving children keep their snapshots; the back
                // reference is cleared rather than left dangling
                for child in node.children {
                    if let Some(child_node) = self.nodes.get_mut(&child) {
                        child_node.parent = None;
                    }
                }
            }
        }
    }
}

fn short_hex(hash: &Hash) -> String {
    hash.iter().take(8).map(|b| format!("{:02x}", b)).collect()
}
