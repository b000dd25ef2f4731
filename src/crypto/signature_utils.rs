use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use crate::core::errors::AccountError;
use crate::crypto::hash::signing_digest;
use crate::crypto::keys::PubKey;

/// `[R || S]`
pub const COMPACT_SIGNATURE_LEN: usize = 64;

/// `[R || S || V]`
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// Split a 64- or 65-byte signature into its ECDSA part and optional recovery id.
pub fn split_signature(sig: &[u8]) -> Result<(Signature, Option<RecoveryId>), AccountError> {
    let (compact, v) = match sig.len() {
        COMPACT_SIGNATURE_LEN => (sig, None),
        RECOVERABLE_SIGNATURE_LEN => (&sig[..COMPACT_SIGNATURE_LEN], Some(sig[COMPACT_SIGNATURE_LEN])),
        other => {
            return Err(AccountError::Signing(format!(
                "signature must be {} or {} bytes, got {}",
                COMPACT_SIGNATURE_LEN, RECOVERABLE_SIGNATURE_LEN, other
            )))
        }
    };

    let signature = Signature::from_slice(compact)
        .map_err(|e| AccountError::Signing(format!("malformed signature: {}", e)))?;
    let recovery_id = match v {
        Some(v) => Some(
            RecoveryId::from_byte(normalize_v(v))
                .ok_or_else(|| AccountError::Signing(format!("invalid recovery id: {}", v)))?,
        ),
        None => None,
    };
    Ok((signature, recovery_id))
}

/// Map Ethereum-style `v` (27/28) onto the raw recovery id (0/1); other values pass through.
pub fn normalize_v(v: u8) -> u8 {
    if v == 27 || v == 28 {
        return v - 27;
    }
    v
}

/// Recover the signer's public key from a 65-byte signature produced by
/// [`PrivKey::sign`](crate::crypto::keys::PrivKey::sign) over `msg`.
pub fn recover_pubkey(msg: &[u8], sig: &[u8]) -> Result<PubKey, AccountError> {
    let (signature, recovery_id) = split_signature(sig)?;
    let recovery_id = recovery_id.ok_or_else(|| {
        AccountError::Signing("public key recovery needs a 65-byte signature".to_string())
    })?;

    let digest = signing_digest(msg);
    let key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
        .map_err(|e| AccountError::Signing(format!("public key recovery failed: {}", e)))?;
    Ok(PubKey::from_verifying_key(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::PrivKey;
    use k256::ecdsa::SigningKey;

    fn test_key() -> PrivKey {
        PrivKey::from_signing_key(SigningKey::from_slice(&[0x11u8; 32]).unwrap())
    }

    #[test]
    fn test_normalize_v() {
        assert_eq!(normalize_v(27), 0);
        assert_eq!(normalize_v(28), 1);
        assert_eq!(normalize_v(0), 0);
        assert_eq!(normalize_v(1), 1);
    }

    #[test]
    fn test_recover_pubkey() {
        let key = test_key();
        let sig = key.sign(b"payload").unwrap();
        assert_eq!(recover_pubkey(b"payload", &sig).unwrap(), key.pub_key());
    }

    #[test]
    fn test_recover_accepts_eth_style_v() {
        let key = test_key();
        let mut sig = key.sign(&[0x44u8; 32]).unwrap();
        sig[64] += 27;
        assert_eq!(recover_pubkey(&[0x44u8; 32], &sig).unwrap(), key.pub_key());
    }

    #[test]
    fn test_recover_wrong_message_gives_other_key() {
        let key = test_key();
        let sig = key.sign(b"payload").unwrap();
        match recover_pubkey(b"other payload", &sig) {
            Ok(pk) => assert_ne!(pk, key.pub_key()),
            Err(e) => assert!(matches!(e, AccountError::Signing(_))),
        }
    }

    #[test]
    fn test_recover_requires_v() {
        let key = test_key();
        let sig = key.sign(b"payload").unwrap();
        assert!(matches!(
            recover_pubkey(b"payload", &sig[..64]),
            Err(AccountError::Signing(_))
        ));
    }

    #[test]
    fn test_split_rejects_bad_lengths() {
        assert!(split_signature(&[0u8; 63]).is_err());
        assert!(split_signature(&[0u8; 66]).is_err());
    }

    #[test]
    fn test_split_rejects_bad_v() {
        let mut sig = test_key().sign(b"x").unwrap();
        sig[64] = 9;
        assert!(matches!(split_signature(&sig), Err(AccountError::Signing(_))));
    }
}
