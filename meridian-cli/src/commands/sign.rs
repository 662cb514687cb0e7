//! Message and digest signing and verification.

use clap::Args;
use colored::Colorize;
use meridian::encoding::decode_hex_array;
use meridian_keychain::{verify_digest, verify_message, Blockchain, DerivationPath, Network};
use serde::Serialize;

use super::print_json;
use super::source::{ChainArgs, SourceArgs};

/// Sign a message, or a 32-byte digest with `--digest`.
#[derive(Args)]
pub struct SignCommand {
    #[command(flatten)]
    chain: ChainArgs,

    #[command(flatten)]
    source: SourceArgs,

    /// Signing key path; defaults to the first receive address.
    #[arg(long)]
    path: Option<DerivationPath>,

    /// Message text, or hex digest with `--digest`.
    #[arg(long)]
    message: String,

    /// Treat the message as a hex-encoded 32-byte digest.
    #[arg(long)]
    digest: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

/// Verify a signature produced by `sign`.
#[derive(Args)]
pub struct VerifyCommand {
    /// Blockchain ticker or name.
    #[arg(short, long)]
    chain: Blockchain,

    /// Use testnet parameters (Bitcoin family only).
    #[arg(short, long)]
    testnet: bool,

    /// Address (Bitcoin family, ETH for messages) or public key.
    #[arg(long)]
    public: String,

    /// Message text, or hex digest with `--digest`.
    #[arg(long)]
    message: String,

    /// Signature as printed by `sign`.
    #[arg(long)]
    signature: String,

    /// Treat the message as a hex-encoded 32-byte digest.
    #[arg(long)]
    digest: bool,
}

#[derive(Serialize)]
struct SignOutput<'a> {
    path: String,
    address: &'a str,
    signature: &'a str,
}

impl SignCommand {
    /// Execute the sign command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let keychain = self.chain.open(&self.source.key_source()?)?;
        let path = match self.path {
            Some(path) => path,
            None => keychain.default_path(0, false, 0)?,
        };
        let key = keychain.derive(&path)?;

        let signature = if self.digest {
            keychain.sign_digest(&path, &decode_hex_array::<32>(&self.message)?)?
        } else {
            keychain.sign_message(&path, self.message.as_bytes())?
        };

        if self.json {
            print_json(&SignOutput {
                path: path.to_string(),
                address: &key.address,
                signature: &signature,
            })?;
        } else {
            print_signature(&path, &key.address, &signature);
        }
        Ok(())
    }
}

impl VerifyCommand {
    /// Execute the verify command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let network = if self.testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        };
        let valid = if self.digest {
            let digest = decode_hex_array::<32>(&self.message)?;
            verify_digest(self.chain, network, &self.public, &digest, &self.signature)?
        } else {
            verify_message(self.chain, network, &self.public, self.message.as_bytes(), &self.signature)?
        };

        if valid {
            println!("{}", "Signature is valid".green().bold());
            Ok(())
        } else {
            Err("signature does not match".into())
        }
    }
}

#[rustfmt::skip]
fn print_signature(path: &DerivationPath, address: &str, signature: &str) {
    println!();
    println!("      {}      {}", "Path".cyan().bold(), path);
    println!("      {}   {}", "Address".cyan().bold(), address);
    println!("      {} {}", "Signature".cyan().bold(), signature.green());
    println!();
}
