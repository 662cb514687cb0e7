//! Per-chain [`Keychain`](crate::Keychain) adapters.

mod bitcoin;
mod eos;
mod ethereum;
mod ripple;

pub use bitcoin::BitcoinKeychain;
pub use eos::EosKeychain;
pub use ethereum::EthereumKeychain;
pub use ripple::RippleKeychain;

use crate::{Blockchain, Error, Network};

/// Account-model chains only have mainnet parameters.
pub(crate) fn check_network(blockchain: Blockchain, network: Network) -> Result<(), Error> {
    if blockchain.supports(network) {
        Ok(())
    } else {
        Err(Error::UnsupportedNetwork {
            blockchain,
            network,
        })
    }
}
