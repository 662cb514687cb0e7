//! One entry point for every Meridian chain.
//!
//! [`open`] maps a [`Blockchain`], a [`Network`] and a [`KeySource`] to a
//! boxed [`Keychain`]. The per-chain crates stay usable on their own; this
//! crate only dispatches.
//!
//! ```
//! use meridian_keychain::{open, Blockchain, KeySource, Network};
//!
//! let source = KeySource::mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None,
//! );
//! let keychain = open(Blockchain::Eth, Network::Mainnet, &source)?;
//! let path = keychain.default_path(0, false, 0)?;
//! assert_eq!(
//!     keychain.derive(&path)?.address,
//!     "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
//! );
//! # Ok::<(), meridian_keychain::Error>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod blockchain;
pub mod chains;
mod error;
mod keychain;
mod source;
mod verify;

pub use blockchain::{Blockchain, ParseBlockchainError};
pub use error::Error;
pub use keychain::{DerivedKey, Keychain};
pub use meridian::DerivationPath;
pub use meridian_btc::{AddressType, Network};
pub use source::KeySource;
pub use verify::{verify_digest, verify_message};

use chains::{BitcoinKeychain, EosKeychain, EthereumKeychain, RippleKeychain};
use tracing::debug;

/// A convenient Result type alias for keychain operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Open a keychain for `blockchain` on `network`.
///
/// Bitcoin-family chains render their default address type; use
/// [`BitcoinKeychain::open`] to pick another.
///
/// # Errors
///
/// Returns [`Error::UnsupportedNetwork`] for testnet on ETH, EOS or XRP, or
/// the chain's error if the source does not decode.
pub fn open(blockchain: Blockchain, network: Network, source: &KeySource) -> Result<Box<dyn Keychain>> {
    debug!(chain = %blockchain, %network, source = source.kind(), "open keychain");
    let keychain: Box<dyn Keychain> = match (blockchain, blockchain.coin()) {
        (_, Some(coin)) => Box::new(BitcoinKeychain::open(
            coin,
            network,
            source,
            coin.default_address_type(),
        )?),
        (Blockchain::Eth, None) => Box::new(EthereumKeychain::open(network, source)?),
        (Blockchain::Eos, None) => Box::new(EosKeychain::open(network, source)?),
        (_, None) => Box::new(RippleKeychain::open(network, source)?),
    };
    Ok(keychain)
}
