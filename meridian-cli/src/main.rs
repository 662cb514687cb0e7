//! Meridian - derive, sign and verify keys across Bitcoin-family chains,
//! Ethereum, EOS and the XRP Ledger.

mod commands;
mod logging;

use clap::Parser;
use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Mnemonic(cmd) => cmd.execute()?,
        Commands::Derive(cmd) => cmd.execute()?,
        Commands::Xpub(cmd) => cmd.execute()?,
        Commands::Sign(cmd) => cmd.execute()?,
        Commands::Verify(cmd) => cmd.execute()?,
        Commands::Seal(cmd) => cmd.execute()?,
        Commands::Unseal(cmd) => cmd.execute()?,
    }
    Ok(())
}
