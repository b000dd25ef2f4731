//! secp256k1 key types
//!
//! `PrivKey`/`PubKey` are the chain-native (Ethereum-style) keys whose
//! address-hash is the last 20 bytes of Keccak-256 over the uncompressed
//! point. `LegacyPubKey` is the plain secp256k1 view of the same 33 compressed
//! bytes, whose address-hash is RIPEMD-160(SHA-256(pubkey)).

use std::fmt;

use elliptic_curve::SecretKey;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::Secp256k1;

use crate::core::errors::AccountError;
use crate::crypto::address_codec::{convert_and_encode, decode_and_convert};
use crate::crypto::hash::{hash160, keccak256, signing_digest, ADDRESS_HASH_LEN};
use crate::crypto::signature_utils::{split_signature, RECOVERABLE_SIGNATURE_LEN};

/// Length of a compressed SEC1 public key.
pub const PUBKEY_COMPRESSED_LEN: usize = 33;

/// Chain-native private key.
///
/// Deliberately neither `Clone` nor `Copy`, and it never hands out its raw
/// scalar; the wrapped `SigningKey` zeroizes itself on drop.
pub struct PrivKey {
    key: SigningKey,
}

impl PrivKey {
    pub(crate) fn from_signing_key(key: SigningKey) -> Self {
        Self { key }
    }

    pub fn pub_key(&self) -> PubKey {
        PubKey {
            key: self.key.verifying_key().clone(),
        }
    }

    /// Recoverable ECDSA signature `[R || S || V]` over [`signing_digest`] of `msg`.
    ///
    /// `S` is always in the lower half of the curve order and `V` is the raw
    /// recovery id (0 or 1).
    pub fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, AccountError> {
        let digest = signing_digest(msg);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| AccountError::Signing(e.to_string()))?;

        let mut out = Vec::with_capacity(RECOVERABLE_SIGNATURE_LEN);
        out.extend_from_slice(&signature.to_bytes());
        out.push(recovery_id.to_byte());
        Ok(out)
    }

    /// Same scalar as a curve-generic `elliptic_curve::SecretKey`.
    pub fn to_ecdsa(&self) -> Result<SecretKey<Secp256k1>, AccountError> {
        SecretKey::from_bytes(&self.key.to_bytes())
            .map_err(|e| AccountError::KeyConversion(e.to_string()))
    }
}

impl fmt::Debug for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivKey(<redacted>)")
    }
}

/// Chain-native public key.
#[derive(Clone, PartialEq, Eq)]
pub struct PubKey {
    key: VerifyingKey,
}

impl PubKey {
    /// Accepts compressed (33 bytes) or uncompressed (65 bytes) SEC1 encodings.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, AccountError> {
        let key = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| AccountError::KeyConversion(format!("invalid public key: {}", e)))?;
        Ok(Self { key })
    }

    /// Compressed SEC1 bytes.
    pub fn to_bytes(&self) -> [u8; PUBKEY_COMPRESSED_LEN] {
        let point = self.key.to_encoded_point(true);
        let mut out = [0u8; PUBKEY_COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Uncompressed SEC1 bytes (0x04 || X || Y).
    pub fn to_uncompressed_bytes(&self) -> Vec<u8> {
        self.key.to_encoded_point(false).as_bytes().to_vec()
    }

    /// Keccak-256 of the uncompressed point without its 0x04 tag, last 20 bytes.
    pub fn address(&self) -> AccAddress {
        let uncompressed = self.to_uncompressed_bytes();
        let hash = keccak256(&uncompressed[1..]);
        let mut out = [0u8; ADDRESS_HASH_LEN];
        out.copy_from_slice(&hash[12..]);
        AccAddress(out)
    }

    /// Checks a 64-byte `[R || S]` or 65-byte `[R || S || V]` signature over `msg`.
    ///
    /// Uses the same digest rule as [`PrivKey::sign`]. Malformed or high-S
    /// signatures simply fail verification.
    pub fn verify_signature(&self, msg: &[u8], sig: &[u8]) -> bool {
        let signature = match split_signature(sig) {
            Ok((signature, _)) => signature,
            Err(_) => return false,
        };
        self.verify_prehash(&signing_digest(msg), &signature)
    }

    pub(crate) fn verify_prehash(&self, digest: &[u8; 32], signature: &Signature) -> bool {
        self.key.verify_prehash(digest, signature).is_ok()
    }

    pub(crate) fn from_verifying_key(key: VerifyingKey) -> Self {
        Self { key }
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKey({})", hex::encode(self.to_bytes()))
    }
}

/// Plain secp256k1 public key sharing the compressed byte layout of [`PubKey`].
///
/// Exists only to compute legacy addresses; it is not a second identity.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LegacyPubKey {
    key: [u8; PUBKEY_COMPRESSED_LEN],
}

impl LegacyPubKey {
    pub fn to_bytes(&self) -> [u8; PUBKEY_COMPRESSED_LEN] {
        self.key
    }

    /// RIPEMD-160(SHA-256(compressed pubkey)).
    pub fn address(&self) -> AccAddress {
        AccAddress(hash160(&self.key))
    }
}

impl From<&PubKey> for LegacyPubKey {
    fn from(pk: &PubKey) -> Self {
        Self { key: pk.to_bytes() }
    }
}

impl fmt::Debug for LegacyPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LegacyPubKey({})", hex::encode(self.key))
    }
}

/// Raw 20-byte account identifier, the form consumed by transaction builders.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccAddress([u8; ADDRESS_HASH_LEN]);

impl AccAddress {
    pub fn as_bytes(&self) -> &[u8; ADDRESS_HASH_LEN] {
        &self.0
    }

    pub fn to_bech32(&self, prefix: &str) -> Result<String, AccountError> {
        convert_and_encode(prefix, &self.0)
    }

    /// Decode `addr`, requiring the given human-readable prefix.
    pub fn from_bech32(addr: &str, expected_prefix: &str) -> Result<Self, AccountError> {
        let (hrp, bytes) = decode_and_convert(addr)?;
        if hrp != expected_prefix {
            return Err(AccountError::InvalidAddress(format!(
                "expected prefix '{}', got '{}'",
                expected_prefix, hrp
            )));
        }
        let arr: [u8; ADDRESS_HASH_LEN] = bytes.as_slice().try_into().map_err(|_| {
            AccountError::InvalidAddress(format!(
                "expected {} address bytes, got {}",
                ADDRESS_HASH_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

impl From<[u8; ADDRESS_HASH_LEN]> for AccAddress {
    fn from(bytes: [u8; ADDRESS_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccAddress({})", self)
    }
}
