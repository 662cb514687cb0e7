//! Ethereum keys, addresses and signing.
//!
//! Derivation runs on the `bip32` crate over `k256`; addresses are EIP-55
//! checksummed via `alloy-primitives`; messages are signed per EIP-191.
//!
//! ```
//! use meridian::Wallet;
//! use meridian_eth::Deriver;
//!
//! let wallet = Wallet::from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None,
//! )?;
//! let deriver = Deriver::new(&wallet)?;
//! let addr = deriver.derive(0, false, 0)?;
//! let sig = deriver.sign_message(&addr.path, b"hello")?;
//! assert!(deriver.verify_message(&addr.address, b"hello", &sig)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod address;
mod derivation_style;
mod deriver;
pub mod eip191;
mod error;
mod standard_wallet;

pub use derivation_style::{DerivationStyle, ParseDerivationStyleError, COIN_TYPE};
pub use deriver::{DerivedAddress, Deriver};
pub use error::Error;
pub use standard_wallet::StandardWallet;

/// A convenient Result type alias for meridian-eth operations.
pub type Result<T> = core::result::Result<T, Error>;
