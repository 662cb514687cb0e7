//! Address and key derivation.

use clap::Args;
use colored::Colorize;
use meridian_keychain::{DerivationPath, DerivedKey, Keychain};
use serde::Serialize;

use super::print_json;
use super::source::{ChainArgs, SourceArgs};

/// Derive addresses and keys.
#[derive(Args)]
pub struct DeriveCommand {
    #[command(flatten)]
    chain: ChainArgs,

    #[command(flatten)]
    source: SourceArgs,

    /// Explicit derivation path; overrides the position flags.
    #[arg(long)]
    path: Option<DerivationPath>,

    /// Account number.
    #[arg(long, default_value = "0")]
    account: u32,

    /// Derive change (internal) addresses.
    #[arg(long)]
    change: bool,

    /// First address index.
    #[arg(long, default_value = "0")]
    index: u32,

    /// Number of addresses to derive.
    #[arg(long, default_value = "1")]
    count: u32,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct KeyOutput<'a> {
    path: String,
    address: &'a str,
    public_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<&'a str>,
}

impl<'a> From<&'a DerivedKey> for KeyOutput<'a> {
    fn from(key: &'a DerivedKey) -> Self {
        Self {
            path: key.path.to_string(),
            address: &key.address,
            public_key: &key.public_key,
            private_key: key.private_key.as_ref().map(|k| k.as_str()),
        }
    }
}

impl DeriveCommand {
    /// Execute the derive command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let keychain = self.chain.open(&self.source.key_source()?)?;
        let keys = match &self.path {
            Some(path) => vec![keychain.derive(path)?],
            None => keychain.derive_many(self.account, self.change, self.index, self.count)?,
        };

        if self.json {
            let output: Vec<KeyOutput<'_>> = keys.iter().map(KeyOutput::from).collect();
            print_json(&output)?;
        } else {
            print_keys(keychain.as_ref(), &keys);
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_keys(keychain: &dyn Keychain, keys: &[DerivedKey]) {
    println!();
    println!("      {}       {}", "Chain".cyan().bold(), keychain.blockchain().name());
    println!("      {}     {}", "Network".cyan().bold(), keychain.network());
    if keychain.is_watch_only() {
        println!("      {}        {}", "Mode".cyan().bold(), "watch-only".dimmed());
    }
    println!();

    for (i, key) in keys.iter().enumerate() {
        if keys.len() > 1 {
            println!("      {}       {}", "Index".cyan().bold(), format!("[{i}]").dimmed());
        }
        println!("      {}        {}", "Path".cyan().bold(), key.path);
        println!("      {}     {}", "Address".cyan().bold(), key.address.green());
        println!("      {}  {}", "Public Key".cyan().bold(), key.public_key.dimmed());
        if let Some(private_key) = &key.private_key {
            println!("      {} {}", "Private Key".cyan().bold(), private_key.as_str());
        }
        if i + 1 < keys.len() {
            println!();
        }
    }
    println!();
}
