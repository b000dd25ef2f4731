//! Digest helpers behind the two address schemes and the signing digest.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Length of an account address-hash in bytes.
pub const ADDRESS_HASH_LEN: usize = 20;

/// Legacy Keccak-256 (pre-NIST padding), as used by Ethereum.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// RIPEMD-160(SHA-256(data)), the address-hash of plain secp256k1 keys.
pub fn hash160(data: &[u8]) -> [u8; ADDRESS_HASH_LEN] {
    ripemd160(&sha256(data))
}

/// Digest that actually gets signed: 32-byte inputs are treated as
/// precomputed digests, anything else is hashed with Keccak-256 first.
pub fn signing_digest(msg: &[u8]) -> [u8; 32] {
    match <[u8; 32]>::try_from(msg) {
        Ok(digest) => digest,
        Err(_) => keccak256(msg),
    }
}
