use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::bip44::{Bip44Path, BIP44_HD_PATH};
use crate::core::errors::AccountError;

/// Bech32 human-readable prefix of current account addresses.
pub const BECH32_PREFIX: &str = "d0";

/// Bech32 human-readable prefix of legacy account addresses.
pub const LEGACY_BECH32_PREFIX: &str = "dx";

/// Environment overrides recognised by [`AccountConfig::from_env`].
pub const ENV_BECH32_PREFIX: &str = "ACCOUNT_BECH32_PREFIX";
pub const ENV_LEGACY_BECH32_PREFIX: &str = "ACCOUNT_LEGACY_BECH32_PREFIX";
pub const ENV_HD_PATH: &str = "ACCOUNT_HD_PATH";

/// Chain-specific account parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Prefix for the current address encoding
    pub bech32_prefix: String,

    /// Prefix for the legacy address encoding
    pub legacy_bech32_prefix: String,

    /// HD derivation path
    pub derivation_path: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            bech32_prefix: BECH32_PREFIX.to_string(),
            legacy_bech32_prefix: LEGACY_BECH32_PREFIX.to_string(),
            derivation_path: BIP44_HD_PATH.to_string(),
        }
    }
}

impl AccountConfig {
    /// Parse a TOML document; missing keys fall back to the chain defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, AccountError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AccountError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading account config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Defaults overlaid with `ACCOUNT_*` environment variables.
    pub fn from_env() -> Result<Self, AccountError> {
        let mut config = Self::default();
        if let Ok(prefix) = std::env::var(ENV_BECH32_PREFIX) {
            config.bech32_prefix = prefix;
        }
        if let Ok(prefix) = std::env::var(ENV_LEGACY_BECH32_PREFIX) {
            config.legacy_bech32_prefix = prefix;
        }
        if let Ok(path) = std::env::var(ENV_HD_PATH) {
            config.derivation_path = path;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AccountError> {
        validate_hrp(&self.bech32_prefix)?;
        validate_hrp(&self.legacy_bech32_prefix)?;
        if self.bech32_prefix == self.legacy_bech32_prefix {
            return Err(AccountError::Config(format!(
                "current and legacy prefixes must differ, both are '{}'",
                self.bech32_prefix
            )));
        }
        self.bip44_path()
            .map_err(|e| AccountError::Config(e.to_string()))?;
        Ok(())
    }

    pub fn bip44_path(&self) -> Result<Bip44Path, AccountError> {
        self.derivation_path.parse()
    }
}

// bech32 HRPs: 1..=83 chars in the printable range; lowercase only to keep one canonical form
fn validate_hrp(hrp: &str) -> Result<(), AccountError> {
    if hrp.is_empty() || hrp.len() > 83 {
        return Err(AccountError::Config(format!(
            "bech32 prefix must be 1..=83 characters, got {}",
            hrp.len()
        )));
    }
    if !hrp.bytes().all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase()) {
        return Err(AccountError::Config(format!(
            "bech32 prefix '{}' must be lowercase printable ASCII",
            hrp
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AccountConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bech32_prefix, "d0");
        assert_eq!(config.legacy_bech32_prefix, "dx");
        assert_eq!(config.bip44_path().unwrap(), Bip44Path::ethereum_default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AccountConfig::from_toml_str("bech32_prefix = \"tdx\"").unwrap();
        assert_eq!(config.bech32_prefix, "tdx");
        assert_eq!(config.legacy_bech32_prefix, LEGACY_BECH32_PREFIX);
        assert_eq!(config.derivation_path, BIP44_HD_PATH);
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let mut config = AccountConfig::default();
        config.bech32_prefix = "D0".to_string();
        assert!(matches!(config.validate(), Err(AccountError::Config(_))));

        config.bech32_prefix = String::new();
        assert!(matches!(config.validate(), Err(AccountError::Config(_))));
    }

    #[test]
    fn test_rejects_equal_prefixes() {
        let mut config = AccountConfig::default();
        config.legacy_bech32_prefix = config.bech32_prefix.clone();
        assert!(matches!(config.validate(), Err(AccountError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_path() {
        let result = AccountConfig::from_toml_str("derivation_path = \"m/44'/60'\"");
        assert!(matches!(result, Err(AccountError::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = AccountConfig::from_toml_str("bech32_prefix = ");
        assert!(matches!(result, Err(AccountError::Config(_))));
    }
}
