//! BIP39 mnemonic phrases
//!
//! Word-list lookup and checksum validation come from the `bip39` crate.
//! The phrase and the passphrase are kept in zeroizing buffers.

use bip39::Language;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::Zeroize;

use crate::core::errors::AccountError;
use crate::security::secret::{string_to_secret, vec_to_secret};
use crate::security::{SecretString, SecretVec};

/// Entropy for freshly generated phrases: 256 bits, i.e. 24 words.
pub const MNEMONIC_ENTROPY_BYTES: usize = 32;

/// A validated mnemonic phrase together with its BIP39 passphrase.
pub struct Mnemonic {
    words: SecretString,
    password: SecretString,
    word_count: usize,
}

impl Mnemonic {
    /// Generate a random 24-word English mnemonic bound to `password`.
    pub fn generate(password: &str) -> Result<Self, AccountError> {
        let mut entropy = [0u8; MNEMONIC_ENTROPY_BYTES];
        OsRng
            .try_fill_bytes(&mut entropy)
            .map_err(|e| AccountError::MnemonicGeneration(format!("entropy source failed: {}", e)))?;

        let result = bip39::Mnemonic::from_entropy_in(Language::English, &entropy)
            .map_err(|e| AccountError::MnemonicGeneration(e.to_string()));
        entropy.zeroize();
        let mnemonic = result?;

        debug!(word_count = mnemonic.word_count(), "generated mnemonic");
        Ok(Self::from_parsed(&mnemonic, password))
    }

    /// Parse and checksum an English phrase.
    ///
    /// Surrounding and repeated whitespace is normalized away. A bad word,
    /// word count or checksum is reported as [`AccountError::Derivation`],
    /// the error raised when deriving keys from unusable words.
    pub fn from_phrase(words: &str, password: &str) -> Result<Self, AccountError> {
        let normalized = string_to_secret(words.split_whitespace().collect::<Vec<_>>().join(" "));
        let mnemonic = bip39::Mnemonic::parse_in_normalized(Language::English, &normalized)
            .map_err(|e| AccountError::Derivation(format!("invalid mnemonic: {}", e)))?;
        Ok(Self::from_parsed(&mnemonic, password))
    }

    fn from_parsed(mnemonic: &bip39::Mnemonic, password: &str) -> Self {
        Self {
            words: string_to_secret(mnemonic.to_string()),
            password: string_to_secret(password.to_string()),
            word_count: mnemonic.word_count(),
        }
    }

    /// Space-separated phrase.
    pub fn words(&self) -> &str {
        &self.words
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// 64-byte BIP39 seed (PBKDF2-HMAC-SHA512, 2048 rounds, salt "mnemonic" + password).
    pub fn to_seed(&self) -> Result<SecretVec, AccountError> {
        let mnemonic = bip39::Mnemonic::parse_in_normalized(Language::English, &self.words)
            .map_err(|e| AccountError::Derivation(format!("invalid mnemonic: {}", e)))?;
        let mut seed = mnemonic.to_seed(self.password.as_str());
        let out = vec_to_secret(seed.to_vec());
        seed.zeroize();
        Ok(out)
    }
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count)
            .finish_non_exhaustive()
    }
}
