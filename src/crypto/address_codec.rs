//! Bech32 encoding of address-hash bytes.

use bech32::{FromBase32, ToBase32, Variant};

use crate::core::errors::AccountError;

/// Convert 8-bit `data` to 5-bit groups and bech32-encode it under `hrp`.
pub fn convert_and_encode(hrp: &str, data: &[u8]) -> Result<String, AccountError> {
    bech32::encode(hrp, data.to_base32(), Variant::Bech32)
        .map_err(|e| AccountError::Encoding(format!("bech32 encode with prefix '{}': {}", hrp, e)))
}

/// Decode a bech32 string into its human-readable part and 8-bit payload.
pub fn decode_and_convert(encoded: &str) -> Result<(String, Vec<u8>), AccountError> {
    let (hrp, data, variant) = bech32::decode(encoded)
        .map_err(|e| AccountError::InvalidAddress(format!("'{}': {}", encoded, e)))?;
    if variant != Variant::Bech32 {
        return Err(AccountError::InvalidAddress(format!(
            "'{}': bech32m checksum is not accepted",
            encoded
        )));
    }
    let bytes = Vec::<u8>::from_base32(&data)
        .map_err(|e| AccountError::InvalidAddress(format!("'{}': {}", encoded, e)))?;
    Ok((hrp, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let bytes = [0xABu8; 20];
        let encoded = convert_and_encode("d0", &bytes).unwrap();
        assert!(encoded.starts_with("d01"));
        let (hrp, decoded) = decode_and_convert(&encoded).unwrap();
        assert_eq!(hrp, "d0");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_known_encoding() {
        let bytes = hex::decode("9858effd232b4033e47d90003d41ec34ecaeda94").unwrap();
        assert_eq!(
            convert_and_encode("d0", &bytes).unwrap(),
            "d01npvwllfr9dqr8erajqqr6s0vxnk2ak55twavxs"
        );
    }

    #[test]
    fn test_empty_hrp_fails() {
        let result = convert_and_encode("", &[1, 2, 3]);
        assert!(matches!(result, Err(AccountError::Encoding(_))));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let mut encoded = convert_and_encode("dx", &[1u8; 20]).unwrap();
        let last = encoded.pop().unwrap();
        encoded.push(if last == 'q' { 'p' } else { 'q' });
        assert!(matches!(
            decode_and_convert(&encoded),
            Err(AccountError::InvalidAddress(_))
        ));
    }
}
