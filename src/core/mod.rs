pub mod account;
pub mod bip44;
pub mod config;
pub mod errors;
pub mod mnemonic;

pub use account::Account;
pub use bip44::{Bip44Path, BIP44_HD_PATH};
pub use config::{AccountConfig, BECH32_PREFIX, LEGACY_BECH32_PREFIX};
pub use errors::AccountError;
pub use mnemonic::Mnemonic;
