//! Property-based tests over signing, sequencing and address encoding.

use decimal_account::core::Account;
use decimal_account::crypto::{convert_and_encode, decode_and_convert, recover_pubkey, AccAddress};
use once_cell::sync::Lazy;
use proptest::prelude::*;

const MNEMONIC_12: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

// derivation runs PBKDF2; share one account across cases
static ACCOUNT: Lazy<Account> =
    Lazy::new(|| Account::from_mnemonic_words(MNEMONIC_12, "").expect("derive"));

fn account() -> &'static Account {
    &ACCOUNT
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn property_sign_then_verify(payload in proptest::collection::vec(any::<u8>(), 0..512)) {
        let account = account();
        let sig = account.sign(&payload).unwrap();
        prop_assert_eq!(sig.len(), 65);
        prop_assert!(sig[64] <= 1);
        prop_assert!(account.public_key().verify_signature(&payload, &sig));
        prop_assert_eq!(&recover_pubkey(&payload, &sig).unwrap(), account.public_key());
    }

    #[test]
    fn property_tampered_payload_fails(
        payload in proptest::collection::vec(any::<u8>(), 1..128),
        flip in any::<usize>(),
    ) {
        let account = account();
        let sig = account.sign(&payload).unwrap();
        let mut tampered = payload.clone();
        let idx = flip % tampered.len();
        tampered[idx] ^= 0x01;
        prop_assert!(!account.public_key().verify_signature(&tampered, &sig));
    }

    #[test]
    fn property_sequence_increments(start in 0u64..u64::MAX / 2, n in 0usize..64) {
        let mut account = Account::from_mnemonic_words(MNEMONIC_12, "").unwrap();
        account.with_sequence(start);
        for _ in 0..n {
            account.increment_sequence();
        }
        prop_assert_eq!(account.sequence(), start + n as u64);
    }

    #[test]
    fn property_address_bech32_roundtrip(bytes in any::<[u8; 20]>(), prefix in "[a-z]{1,10}") {
        let addr = AccAddress::from(bytes);
        let encoded = addr.to_bech32(&prefix).unwrap();
        prop_assert_eq!(AccAddress::from_bech32(&encoded, &prefix).unwrap(), addr);
    }

    #[test]
    fn property_codec_preserves_payload(data in proptest::collection::vec(any::<u8>(), 0..40)) {
        let encoded = convert_and_encode("d0", &data).unwrap();
        let (hrp, decoded) = decode_and_convert(&encoded).unwrap();
        prop_assert_eq!(hrp, "d0");
        prop_assert_eq!(decoded, data);
    }
}
