//! Mnemonic generation.

use clap::Args;
use colored::Colorize;
use meridian::Wallet;

/// Generate a new BIP-39 mnemonic.
#[derive(Args)]
pub struct MnemonicCommand {
    /// Number of mnemonic words (12, 15, 18, 21, or 24).
    #[arg(short, long, default_value = "12")]
    words: usize,
}

impl MnemonicCommand {
    /// Execute the mnemonic command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let wallet = Wallet::generate(self.words, None)?;
        let phrase = wallet.mnemonic().ok_or("generated wallet has no mnemonic")?;
        print_mnemonic(self.words, phrase);
        Ok(())
    }
}

#[rustfmt::skip]
fn print_mnemonic(words: usize, phrase: &str) {
    println!();
    println!("      {}    {words}", "Words".cyan().bold());
    println!("      {} {}", "Mnemonic".cyan().bold(), phrase.green());
    println!();
}
