// src/lib.rs

pub mod cli;
pub mod core;
pub mod crypto;
pub mod security;

pub use crate::core::{Account, AccountConfig, AccountError, Mnemonic};
pub use crate::crypto::{AccAddress, LegacyPubKey, PrivKey, PubKey};
