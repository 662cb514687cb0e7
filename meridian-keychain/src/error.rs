//! Error types for keychain dispatch.

use crate::{Blockchain, Network};

/// Errors from opening or using a keychain.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Core wallet or path error.
    #[error(transparent)]
    Core(#[from] meridian::Error),

    /// Bitcoin-family error.
    #[error(transparent)]
    Btc(#[from] meridian_btc::Error),

    /// Ethereum error.
    #[error(transparent)]
    Eth(#[from] meridian_eth::Error),

    /// EOS error.
    #[error(transparent)]
    Eos(#[from] meridian_eos::Error),

    /// XRP Ledger error.
    #[error(transparent)]
    Xrp(#[from] meridian_xrp::Error),

    /// The blockchain has no parameters for this network.
    #[error("{blockchain} does not support {network}")]
    UnsupportedNetwork {
        /// Requested blockchain.
        blockchain: Blockchain,
        /// Requested network.
        network: Network,
    },
}
