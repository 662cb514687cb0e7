//! CLI command definitions and handlers.

mod derive;
mod mnemonic;
mod seal;
mod sign;
mod source;
mod xpub;

use clap::{ArgAction, Parser, Subcommand};
pub use derive::DeriveCommand;
pub use mnemonic::MnemonicCommand;
pub use seal::{SealCommand, UnsealCommand};
pub use sign::{SignCommand, VerifyCommand};
pub use xpub::XpubCommand;

/// Meridian - one HD key facade for many blockchains.
#[derive(Parser)]
#[command(name = "meridian")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Ignored when RUST_LOG is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new BIP-39 mnemonic.
    Mnemonic(MnemonicCommand),

    /// Derive addresses and keys.
    Derive(DeriveCommand),

    /// Print extended keys.
    Xpub(XpubCommand),

    /// Sign a message or digest.
    Sign(SignCommand),

    /// Verify a message or digest signature.
    Verify(VerifyCommand),

    /// Encrypt data under a password.
    Seal(SealCommand),

    /// Decrypt sealed data.
    Unseal(UnsealCommand),
}

/// Render `value` as pretty JSON on stdout.
fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
