//! BIP44 HD derivation
//!
//! Path format: m/purpose'/coin_type'/account'/change/address_index
//!
//! Accounts on the chain use the Ethereum coin type, so the default path is
//! `m/44'/60'/0'/0/0`. Child key derivation itself is delegated to `coins-bip32`.

use std::fmt;
use std::str::FromStr;

use coins_bip32::xkeys::{Parent, XPriv};
use k256::ecdsa::SigningKey;
use tracing::debug;

use crate::core::errors::AccountError;

/// Default HD path used to derive account keys.
pub const BIP44_HD_PATH: &str = "m/44'/60'/0'/0/0";

const HARDENED_BIT: u32 = 0x8000_0000;

/// BIP44 derivation path structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bip44Path {
    /// Purpose level, 44 for BIP44
    pub purpose: u32,
    /// Coin type (60=ETH)
    pub coin_type: u32,
    /// Account index
    pub account: u32,
    /// External/internal chain (0=external, 1=internal change)
    pub change: u32,
    /// Address index within the chain
    pub address_index: u32,
}

impl Bip44Path {
    /// Default Ethereum-compatible path: m/44'/60'/0'/0/0
    pub fn ethereum_default() -> Self {
        Self {
            purpose: 44,
            coin_type: 60,
            account: 0,
            change: 0,
            address_index: 0,
        }
    }

    /// Child indices of the path. The first three levels are hardened.
    pub fn to_derivation_path(&self) -> [u32; 5] {
        [
            HARDENED_BIT | self.purpose,
            HARDENED_BIT | self.coin_type,
            HARDENED_BIT | self.account,
            self.change,
            self.address_index,
        ]
    }

    /// Derive the secp256k1 signing key at this path from a BIP39 seed.
    pub fn derive_signing_key(&self, seed: &[u8]) -> Result<SigningKey, AccountError> {
        let mut xpriv = XPriv::root_from_seed(seed, None)
            .map_err(|e| AccountError::Derivation(format!("master key derivation failed: {}", e)))?;

        for index in self.to_derivation_path() {
            xpriv = xpriv.derive_child(index).map_err(|e| {
                AccountError::Derivation(format!("child derivation at index {:#x} failed: {}", index, e))
            })?;
        }

        debug!(path = %self, "derived account key");
        let key: &SigningKey = xpriv.as_ref();
        Ok(key.clone())
    }
}

impl Default for Bip44Path {
    fn default() -> Self {
        Self::ethereum_default()
    }
}

impl fmt::Display for Bip44Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/{}'/{}'/{}'/{}/{}",
            self.purpose, self.coin_type, self.account, self.change, self.address_index
        )
    }
}

impl FromStr for Bip44Path {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');
        if parts.next() != Some("m") {
            return Err(AccountError::Derivation(format!(
                "derivation path must start with 'm': {}",
                s
            )));
        }

        let levels = parts
            .map(parse_level)
            .collect::<Result<Vec<_>, _>>()?;
        if levels.len() != 5 {
            return Err(AccountError::Derivation(format!(
                "expected 5 levels in BIP44 path, got {}",
                levels.len()
            )));
        }

        // purpose, coin_type and account must be hardened; change and index must not
        let expected_hardened = [true, true, true, false, false];
        for (i, ((_, hardened), expected)) in levels.iter().zip(expected_hardened).enumerate() {
            if *hardened != expected {
                return Err(AccountError::Derivation(format!(
                    "level {} of '{}' must {}be hardened",
                    i,
                    s,
                    if expected { "" } else { "not " }
                )));
            }
        }

        Ok(Self {
            purpose: levels[0].0,
            coin_type: levels[1].0,
            account: levels[2].0,
            change: levels[3].0,
            address_index: levels[4].0,
        })
    }
}

fn parse_level(level: &str) -> Result<(u32, bool), AccountError> {
    let (digits, hardened) = match level.strip_suffix('\'').or_else(|| level.strip_suffix('h')) {
        Some(d) => (d, true),
        None => (level, false),
    };
    let index: u32 = digits
        .parse()
        .map_err(|_| AccountError::Derivation(format!("invalid path level: '{}'", level)))?;
    if index >= HARDENED_BIT {
        return Err(AccountError::Derivation(format!(
            "path level out of range: {}",
            index
        )));
    }
    Ok((index, hardened))
}
