//! Core ledger types

use crate::crypto::content_hash;
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// Hash type: 256-bit content hash
pub type Hash = [u8; 32];

/// Coin amount. Signed so that a negative declared output is a
/// representable, rejectable input rather than a construction failure.
pub type Amount = i64;

/// Compressed secp256k1 public key carried as raw bytes; decoded only
/// at signature-verification time.
pub type PubKeyBytes = Vec<u8>;

/// Identity of an unspent output: creating transaction hash and
/// position within that transaction's output list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtxoId {
    pub tx_hash: Hash,
    pub output_index: u32,
}

/// A coin output: an amount owned by a public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub value: Amount,
    pub owner: PubKeyBytes,
}

/// A claim on a prior output, authenticated by a signature over the
/// consuming transaction's signable payload for this input's index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub prev_tx_hash: Hash,
    pub output_index: u32,
    pub signature: Vec<u8>,
}

impl Input {
    /// Identity of the output this input claims
    pub fn claimed_utxo(&self) -> UtxoId {
        UtxoId {
            tx_hash: self.prev_tx_hash,
            output_index: self.output_index,
        }
    }
}

/// An ordered list of inputs and outputs with a content hash computed
/// from the finalized contents. A coinbase transaction has no inputs
/// and mints new value into its outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    coinbase: bool,
    hash: Hash,
}

impl Transaction {
    /// Create an empty, unfinalized transaction
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finalized coinbase transaction minting `value` to `owner`
    pub fn coinbase(value: Amount, owner: PubKeyBytes) -> Self {
        let mut tx = Self {
            coinbase: true,
            ..Self::default()
        };
        tx.outputs.push(Output { value, owner });
        tx.finalize();
        tx
    }

    pub fn add_input(&mut self, prev_tx_hash: Hash, output_index: u32) {
        self.inputs.push(Input {
            prev_tx_hash,
            output_index,
            signature: Vec::new(),
        });
    }

    pub fn add_output(&mut self, value: Amount, owner: PubKeyBytes) {
        self.outputs.push(Output { value, owner });
    }

    /// Attach a signature to the input at `index`
    pub fn add_signature(&mut self, index: usize, signature: Vec<u8>) -> Result<()> {
        let input = self
            .inputs
            .get_mut(index)
            .ok_or_else(|| LedgerError::Malformed(format!("no input at index {}", index)))?;
        input.signature = signature;
        Ok(())
    }

    /// Canonical signable payload for the input at `index`: the input's
    /// claimed outpoint followed by every declared output. Excludes all
    /// signatures, so signing does not alter what was signed.
    pub fn signable_payload(&self, index: usize) -> Result<Vec<u8>> {
        let input = self
            .inputs
            .get(index)
            .ok_or_else(|| LedgerError::Malformed(format!("no input at index {}", index)))?;

        let mut data = Vec::new();
        data.extend_from_slice(&input.prev_tx_hash);
        data.extend_from_slice(&input.output_index.to_le_bytes());
        for output in &self.outputs {
            data.extend_from_slice(&output.value.to_le_bytes());
            data.extend_from_slice(&output.owner);
        }
        Ok(data)
    }

    /// Compute the content hash from the finalized contents, signatures
    /// included. Must be called after the last mutation.
    pub fn finalize(&mut self) {
        self.hash = content_hash(&self.raw_bytes());
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn is_coinbase(&self) -> bool {
        self.coinbase
    }

    /// Sum of declared output values, or `None` when the total falls
    /// outside the `Amount` domain
    pub fn output_total(&self) -> Option<Amount> {
        self.outputs
            .iter()
            .try_fold(0, |total: Amount, output| total.checked_add(output.value))
    }

    /// Identity of this transaction's output at `index`. Meaningful
    /// only after `finalize`.
    pub fn output_id(&self, index: usize) -> UtxoId {
        UtxoId {
            tx_hash: self.hash,
            output_index: index as u32,
        }
    }

    fn raw_bytes(&self) -> Vec<u8> {
        let mut data = vec![self.coinbase as u8];
        for input in &self.inputs {
            data.extend_from_slice(&input.prev_tx_hash);
            data.extend_from_slice(&input.output_index.to_le_bytes());
            data.extend_from_slice(&(input.signature.len() as u32).to_le_bytes());
            data.extend_from_slice(&input.signature);
        }
        for output in &self.outputs {
            data.extend_from_slice(&output.value.to_le_bytes());
            data.extend_from_slice(&(output.owner.len() as u32).to_le_bytes());
            data.extend_from_slice(&output.owner);
        }
        data
    }
}

/// A proposed extension of the chain: an ordered transaction list plus
/// the coinbase minting this block's reward. `prev_block_hash` is
/// `None` only for the genesis block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub prev_block_hash: Option<Hash>,
    pub coinbase: Transaction,
    pub transactions: Vec<Transaction>,
    hash: Hash,
}

impl Block {
    /// Create an unfinalized block extending `prev_block_hash`
    pub fn new(prev_block_hash: Hash, coinbase: Transaction) -> Self {
        Self {
            prev_block_hash: Some(prev_block_hash),
            coinbase,
            transactions: Vec::new(),
            hash: [0u8; 32],
        }
    }

    /// Create an unfinalized genesis block
    pub fn genesis(coinbase: Transaction) -> Self {
        Self {
            prev_block_hash: None,
            coinbase,
            transactions: Vec::new(),
            hash: [0u8; 32],
        }
    }

    pub fn add_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Compute the block hash from the finalized contents
    pub fn finalize(&mut self) {
        let mut data = Vec::new();
        match self.prev_block_hash {
            Some(prev) => {
                data.push(1u8);
                data.extend_from_slice(&prev);
            }
            None => data.push(0u8),
        }
        data.extend_from_slice(&self.coinbase.hash());
        for tx in &self.transactions {
            data.extend_from_slice(&tx.hash());
        }
        self.hash = content_hash(&data);
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }
}
