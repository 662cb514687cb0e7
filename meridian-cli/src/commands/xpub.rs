//! Extended key export.

use clap::Args;
use colored::Colorize;
use meridian_keychain::DerivationPath;
use serde::Serialize;

use super::print_json;
use super::source::{ChainArgs, SourceArgs};

/// Print the extended public key (and optionally private key) at a path.
#[derive(Args)]
pub struct XpubCommand {
    #[command(flatten)]
    chain: ChainArgs,

    #[command(flatten)]
    source: SourceArgs,

    /// Derivation path; defaults to the account key for `--account`.
    #[arg(long)]
    path: Option<DerivationPath>,

    /// Account number used when no path is given.
    #[arg(long, default_value = "0")]
    account: u32,

    /// Also print the extended private key.
    #[arg(long)]
    private: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct XpubOutput<'a> {
    path: String,
    xpub: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    xprv: Option<&'a str>,
}

impl XpubCommand {
    /// Execute the xpub command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let keychain = self.chain.open(&self.source.key_source()?)?;
        let path = match self.path {
            Some(path) => path,
            // Strip change and index from the first address path.
            None => keychain
                .default_path(self.account, false, 0)?
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or_default(),
        };

        let xpub = keychain.extended_public_key(&path)?;
        let xprv = if self.private {
            Some(keychain.extended_private_key(&path)?)
        } else {
            None
        };

        if self.json {
            print_json(&XpubOutput {
                path: path.to_string(),
                xpub: &xpub,
                xprv: xprv.as_ref().map(|k| k.as_str()),
            })?;
        } else {
            print_extended_keys(&path, &xpub, xprv.as_ref().map(|k| k.as_str()));
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_extended_keys(path: &DerivationPath, xpub: &str, xprv: Option<&str>) {
    println!();
    println!("      {} {}", "Path".cyan().bold(), path);
    println!("      {} {}", "Xpub".cyan().bold(), xpub.green());
    if let Some(xprv) = xprv {
        println!("      {} {}", "Xprv".cyan().bold(), xprv);
    }
    println!();
}
