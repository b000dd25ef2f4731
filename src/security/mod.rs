//! Zeroizing containers for secret material handled by the account.

pub mod secret;

pub use secret::{SecretString, SecretVec};
