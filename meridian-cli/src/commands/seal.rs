//! Password sealing of arbitrary data.

use clap::Args;
use colored::Colorize;

/// Encrypt data under a password.
#[derive(Args)]
pub struct SealCommand {
    /// Password used to derive the encryption key.
    #[arg(short, long, env = "MERIDIAN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Data to seal, as UTF-8 text.
    #[arg(short, long)]
    data: String,
}

/// Decrypt data sealed with `seal`.
#[derive(Args)]
pub struct UnsealCommand {
    /// Password used when sealing.
    #[arg(short, long, env = "MERIDIAN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Sealed data as printed by `seal`.
    #[arg(short, long)]
    sealed: String,
}

impl SealCommand {
    /// Execute the seal command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let sealed = meridian::seal::seal(self.data.as_bytes(), &self.password)?;
        println!("{}", sealed.green());
        Ok(())
    }
}

impl UnsealCommand {
    /// Execute the unseal command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let plaintext = meridian::seal::open(&self.sealed, &self.password)?;
        match core::str::from_utf8(&plaintext) {
            Ok(text) => println!("{text}"),
            Err(_) => println!("{}", hex::encode(plaintext.as_slice())),
        }
        Ok(())
    }
}
