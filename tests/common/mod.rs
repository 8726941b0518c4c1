//! Shared fixtures: deterministic keys, input signing, block assembly

#![allow(dead_code)]

use ledger_core::{Amount, Block, PubKeyBytes, Transaction, UtxoId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

pub struct Key {
    pub secret: SecretKey,
    pub public: PubKeyBytes,
}

/// Deterministic keypair from a non-zero seed byte
pub fn key(seed: u8) -> Key {
    let secp = Secp256k1::new();
    let secret = SecretKey::from_slice(&[seed; 32]).expect("seed must be a valid scalar");
    let public = PublicKey::from_secret_key(&secp, &secret).serialize().to_vec();
    Key { secret, public }
}

/// Sign the input at `index` with `key`. Outputs must all be declared
/// before signing, since the signable payload covers them.
pub fn sign_input(tx: &mut Transaction, index: usize, key: &Key) {
    let secp = Secp256k1::new();
    let payload = tx.signable_payload(index).unwrap();
    let digest: [u8; 32] = Sha256::digest(&payload).into();
    let message = Message::from_digest_slice(&digest).unwrap();
    let signature = secp.sign_ecdsa(&message, &key.secret).serialize_der().to_vec();
    tx.add_signature(index, signature).unwrap();
}

/// A finalized single-input transaction spending `source` into one
/// output per entry of `values`, all paid to `to` and signed by `signer`
pub fn spend(source: &UtxoId, values: &[Amount], to: &Key, signer: &Key) -> Transaction {
    let mut tx = Transaction::new();
    tx.add_input(source.tx_hash, source.output_index);
    for &value in values {
        tx.add_output(value, to.public.clone());
    }
    sign_input(&mut tx, 0, signer);
    tx.finalize();
    tx
}

/// A finalized genesis block whose coinbase mints `value` to `owner`
pub fn genesis_block(value: Amount, owner: &Key) -> Block {
    let mut genesis = Block::genesis(Transaction::coinbase(value, owner.public.clone()));
    genesis.finalize();
    genesis
}

/// A finalized block extending `parent` carrying `txs`. The coinbase
/// owner seed keeps block hashes distinct across otherwise identical
/// blocks.
pub fn block_on(parent: &Block, coinbase_seed: u8, txs: Vec<Transaction>) -> Block {
    let coinbase = Transaction::coinbase(25, vec![coinbase_seed; 33]);
    let mut block = Block::new(parent.hash(), coinbase);
    for tx in txs {
        block.add_transaction(tx);
    }
    block.finalize();
    block
}
