//! Ledger constants

/// Maximum height difference below the best chain at which a new block
/// may still attach. Also the bound that makes pruning of stale
/// branches safe.
pub const CUTOFF_AGE: u64 = 10;

/// Height of the genesis block
pub const GENESIS_HEIGHT: u64 = 1;

/// Size of a compressed secp256k1 public key
pub const COMPRESSED_PUBKEY_SIZE: usize = 33;
