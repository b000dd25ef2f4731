use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use crate::core::{Account, AccountConfig, Mnemonic};
use crate::crypto::PubKey;

/// Decimal account CLI (library-facing definitions)
#[derive(Debug, Parser)]
#[command(name = "account-cli", about = "Decimal account key derivation and signing", version)]
pub struct Cli {
    /// TOML file with prefixes and derivation path; falls back to ACCOUNT_* env vars
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new 24-word mnemonic and derive its account
    Generate {
        /// BIP39 passphrase
        #[arg(long, default_value = "")]
        password: String,
        /// Include the mnemonic words in the output
        #[arg(long)]
        show_mnemonic: bool,
    },
    /// Derive the account behind existing mnemonic words
    Recover {
        #[arg(long)]
        words: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Sign hex-encoded bytes with the account key
    Sign {
        #[arg(long)]
        words: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Payload to sign, hex (optional 0x prefix)
        #[arg(long)]
        message: String,
    },
    /// Check a signature against a compressed public key
    Verify {
        /// Compressed or uncompressed SEC1 public key, hex
        #[arg(long)]
        pubkey: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        signature: String,
    },
}

/// Public view of an account as printed by the CLI.
#[derive(Debug, Serialize)]
pub struct AccountReport {
    pub address: String,
    pub legacy_address: String,
    pub hex_address: String,
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
}

impl AccountReport {
    pub fn from_account(account: &Account) -> Self {
        Self {
            address: account.address().to_string(),
            legacy_address: account.legacy_address().to_string(),
            hex_address: account.sdk_address().to_string(),
            public_key: hex::encode(account.public_key().to_bytes()),
            mnemonic: None,
        }
    }
}

/// Load the config named by `--config`, or the environment-overlaid defaults.
pub fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AccountConfig> {
    match path {
        Some(path) => AccountConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => AccountConfig::from_env().context("invalid ACCOUNT_* environment"),
    }
}

/// Run one CLI command and return its JSON result.
pub fn execute(cli: &Cli) -> anyhow::Result<Value> {
    let config = load_config(cli.config.as_ref())?;

    match &cli.command {
        Commands::Generate {
            password,
            show_mnemonic,
        } => {
            let mnemonic = Mnemonic::generate(password)?;
            let account = Account::from_mnemonic_with_config(&mnemonic, &config)?;
            let mut report = AccountReport::from_account(&account);
            if *show_mnemonic {
                report.mnemonic = Some(mnemonic.words().to_string());
            } else {
                tracing::info!(mnemonic = "<hidden>", "mnemonic generated; pass --show-mnemonic to print it");
            }
            Ok(serde_json::to_value(report)?)
        }
        Commands::Recover { words, password } => {
            let account = Account::from_mnemonic_words_with_config(words, password, &config)?;
            Ok(serde_json::to_value(AccountReport::from_account(&account))?)
        }
        Commands::Sign {
            words,
            password,
            message,
        } => {
            let account = Account::from_mnemonic_words_with_config(words, password, &config)?;
            let payload = decode_hex(message).context("--message is not valid hex")?;
            let signature = account.sign(&payload)?;
            Ok(serde_json::json!({
                "address": account.address(),
                "public_key": hex::encode(account.public_key().to_bytes()),
                "signature": hex::encode(signature),
            }))
        }
        Commands::Verify {
            pubkey,
            message,
            signature,
        } => {
            let pubkey_bytes = decode_hex(pubkey).context("--pubkey is not valid hex")?;
            let pubkey = PubKey::from_sec1_bytes(&pubkey_bytes)?;
            let payload = decode_hex(message).context("--message is not valid hex")?;
            let signature = decode_hex(signature).context("--signature is not valid hex")?;
            Ok(serde_json::json!({
                "valid": pubkey.verify_signature(&payload, &signature),
                "address": pubkey.address().to_bech32(&config.bech32_prefix)?,
            }))
        }
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let s = s.trim();
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}
