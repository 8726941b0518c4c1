//! Signature scheme and content hashing collaborators
//!
//! The validator treats both as opaque: content hashes are
//! double-SHA-256 over the canonical byte form of a transaction or
//! block, and input signatures are DER-encoded ECDSA over the SHA-256
//! digest of the per-input signable payload.

use crate::constants::COMPRESSED_PUBKEY_SIZE;
use crate::types::Hash;
use bitcoin_hashes::{sha256d, Hash as BitcoinHash, HashEngine};
use secp256k1::{ecdsa::Signature, Message, PublicKey, Secp256k1};
use sha2::{Digest, Sha256};

/// Double-SHA-256 content hash
pub fn content_hash(data: &[u8]) -> Hash {
    let mut hasher = sha256d::Hash::engine();
    hasher.input(data);
    let result = sha256d::Hash::from_engine(hasher);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// SHA-256 digest of a signable payload, the message actually signed
pub fn signable_digest(payload: &[u8]) -> [u8; 32] {
    Sha256::digest(payload).into()
}

/// Verify a DER-encoded ECDSA signature over `payload` against the
/// owner's compressed public key.
///
/// Owners are compressed keys only; any other encoding, including a
/// valid uncompressed key, fails verification. Undecodable keys or
/// signatures are verification failures, not faults.
pub fn verify_signature(owner: &[u8], payload: &[u8], signature_bytes: &[u8]) -> bool {
    if owner.len() != COMPRESSED_PUBKEY_SIZE {
        return false;
    }

    let pubkey = match PublicKey::from_slice(owner) {
        Ok(pk) => pk,
        Err(_) => return false,
    };

    let signature = match Signature::from_der(signature_bytes) {
        Ok(sig) => sig,
        Err(_) => return false,
    };

    let digest = signable_digest(payload);
    let message = match Message::from_digest_slice(&digest) {
        Ok(msg) => msg,
        Err(_) => return false,
    };

    let secp = Secp256k1::verification_only();
    secp.verify_ecdsa(&message, &signature, &pubkey).is_ok()
}
