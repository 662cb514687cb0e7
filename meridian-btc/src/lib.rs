//! Bitcoin-family keys, addresses and message signing.
//!
//! One table-driven implementation covers Bitcoin, Litecoin, Bitcoin Cash,
//! Bitcoin SV, Dogecoin, Dash and Emercoin. Each [`Coin`] and [`Network`]
//! pair maps to a static [`ChainParams`] record holding its version bytes,
//! BIP-44 coin type, SegWit HRP or CashAddr prefix, and message magic.
//!
//! # Usage
//!
//! ```
//! use meridian::Wallet;
//! use meridian_btc::{AddressType, Coin, Deriver, Network};
//!
//! let wallet = Wallet::from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None,
//! )?;
//! let deriver = Deriver::new(&wallet, Coin::Bitcoin, Network::Mainnet)?;
//! let addr = deriver.derive(AddressType::P2wpkh, 0, false, 0)?;
//! assert_eq!(addr.address, "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod address;
pub mod cashaddr;
mod deriver;
mod error;
pub mod extended_key;
pub mod message;
mod network;
mod standard_wallet;
mod types;
pub mod wif;

pub use deriver::{DerivedAddress, Deriver};
pub use error::Error;
pub use extended_key::ExtendedKey;
pub use network::{ChainParams, Coin, Network, ParseCoinError, ParseNetworkError};
pub use standard_wallet::StandardWallet;
pub use types::{AddressType, ParseAddressTypeError};

/// A convenient Result type alias for meridian-btc operations.
pub type Result<T> = core::result::Result<T, Error>;
