//! XRP Ledger key derivation, classic addresses and signing.
//!
//! ```
//! use meridian::Wallet;
//! use meridian_xrp::{is_valid_address, Deriver};
//!
//! let wallet = Wallet::from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None,
//! )?;
//! let account = Deriver::new(&wallet)?.derive(0, false, 0)?;
//! assert!(is_valid_address(&account.address));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod address;
mod deriver;
mod error;
pub mod signing;

pub use address::is_valid_address;
pub use deriver::{DerivedAddress, Deriver, COIN_TYPE};
pub use error::Error;

/// A convenient Result type alias for meridian-xrp operations.
pub type Result<T> = core::result::Result<T, Error>;
