use thiserror::Error;

/// Errors raised while deriving, encoding or using an account.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Entropy source or word-list lookup failed while generating a mnemonic.
    #[error("Mnemonic generation error: {0}")]
    MnemonicGeneration(String),

    /// HD derivation failed (bad phrase, bad checksum, malformed path, invalid child key).
    #[error("Key derivation error: {0}")]
    Derivation(String),

    /// Bech32 encoding of well-formed key material failed.
    #[error("Address encoding error: {0}")]
    Encoding(String),

    /// The signing primitive rejected the input.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Conversion to a standard elliptic-curve key failed.
    #[error("Key conversion error: {0}")]
    KeyConversion(String),

    /// An address string could not be decoded or did not match the expected prefix.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AccountError {
    /// Faults that point at a bug or corrupted key material rather than bad input.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AccountError::Encoding(_) | AccountError::KeyConversion(_)
        )
    }

    /// Errors caused by caller-supplied input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AccountError::Derivation(_)
                | AccountError::InvalidAddress(_)
                | AccountError::Config(_)
        )
    }
}

impl From<toml::de::Error> for AccountError {
    fn from(err: toml::de::Error) -> Self {
        AccountError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AccountError {
    fn from(err: std::io::Error) -> Self {
        AccountError::Config(err.to_string())
    }
}
