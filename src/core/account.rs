//! Single signing account
//!
//! ```text
//! mnemonic words + password
//!    ↓
//! BIP39 seed
//!    ↓
//! BIP32 derivation along m/44'/60'/0'/0/0
//!    ↓
//! PrivKey → PubKey ─┬─ keccak address-hash  → bech32 "d0…"
//!                   └─ hash160 of same bytes → bech32 "dx…" (legacy)
//! ```
//!
//! Chain ID, account number and sequence depend on on-chain state and are
//! set after construction.

use elliptic_curve::SecretKey;
use k256::Secp256k1;
use tracing::{debug, info};

use crate::core::config::AccountConfig;
use crate::core::errors::AccountError;
use crate::core::mnemonic::Mnemonic;
use crate::crypto::keys::{AccAddress, LegacyPubKey, PrivKey, PubKey};

/// Key material, cached addresses and transaction-ordering state of one account.
#[derive(Debug)]
pub struct Account {
    private_key: PrivKey,
    public_key: PubKey,
    address: String,
    legacy_address: String,

    // used only when signing transactions
    chain_id: String,
    account_number: u64,
    sequence: u64,
}

impl Account {
    /// Create an account from a freshly generated random mnemonic.
    pub fn generate(password: &str) -> Result<Self, AccountError> {
        Self::generate_with_config(password, &AccountConfig::default())
    }

    pub fn generate_with_config(password: &str, config: &AccountConfig) -> Result<Self, AccountError> {
        let mnemonic = Mnemonic::generate(password)?;
        Self::from_mnemonic_with_config(&mnemonic, config)
    }

    /// Derive the account behind `words` (space-separated) and `password`.
    pub fn from_mnemonic_words(words: &str, password: &str) -> Result<Self, AccountError> {
        Self::from_mnemonic_words_with_config(words, password, &AccountConfig::default())
    }

    pub fn from_mnemonic_words_with_config(
        words: &str,
        password: &str,
        config: &AccountConfig,
    ) -> Result<Self, AccountError> {
        let mnemonic = Mnemonic::from_phrase(words, password)?;
        Self::from_mnemonic_with_config(&mnemonic, config)
    }

    pub fn from_mnemonic(mnemonic: &Mnemonic) -> Result<Self, AccountError> {
        Self::from_mnemonic_with_config(mnemonic, &AccountConfig::default())
    }

    pub fn from_mnemonic_with_config(
        mnemonic: &Mnemonic,
        config: &AccountConfig,
    ) -> Result<Self, AccountError> {
        config.validate()?;
        let path = config.bip44_path()?;
        debug!(path = %path, word_count = mnemonic.word_count(), "deriving account");

        let seed = mnemonic.to_seed()?;
        let private_key = PrivKey::from_signing_key(path.derive_signing_key(&seed)?);
        let public_key = private_key.pub_key();

        let address = public_key.address().to_bech32(&config.bech32_prefix)?;
        let legacy_address = LegacyPubKey::from(&public_key)
            .address()
            .to_bech32(&config.legacy_bech32_prefix)?;

        info!(address = %address, legacy_address = %legacy_address, "account derived");
        Ok(Self {
            private_key,
            public_key,
            address,
            legacy_address,
            chain_id: String::new(),
            account_number: 0,
            sequence: 0,
        })
    }

    /// Sets chain ID of network.
    pub fn with_chain_id(&mut self, chain_id: impl Into<String>) -> &mut Self {
        self.chain_id = chain_id.into();
        self
    }

    pub fn with_account_number(&mut self, account_number: u64) -> &mut Self {
        self.account_number = account_number;
        self
    }

    /// Sets sequence (last used nonce).
    pub fn with_sequence(&mut self, sequence: u64) -> &mut Self {
        self.sequence = sequence;
        self
    }

    /// Advance the sequence by one; saturates at `u64::MAX`.
    pub fn increment_sequence(&mut self) {
        self.sequence = self.sequence.saturating_add(1);
    }

    /// Address in bech32 format under the current prefix.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Address in bech32 format under the legacy prefix.
    pub fn legacy_address(&self) -> &str {
        &self.legacy_address
    }

    /// Raw 20-byte account address.
    pub fn sdk_address(&self) -> AccAddress {
        self.public_key.address()
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    /// Sequence (last used nonce).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn public_key(&self) -> &PubKey {
        &self.public_key
    }

    /// Private key as a curve-generic `elliptic_curve::SecretKey`.
    pub fn to_ecdsa(&self) -> Result<SecretKey<Secp256k1>, AccountError> {
        self.private_key.to_ecdsa()
    }

    /// Sign data by private key and return the 65-byte `[R || S || V]` signature.
    ///
    /// Does not touch the sequence.
    pub fn sign(&self, bytes_to_sign: &[u8]) -> Result<Vec<u8>, AccountError> {
        self.private_key.sign(bytes_to_sign)
    }
}
