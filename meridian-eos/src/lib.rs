//! EOS key derivation, key string formats and canonical signatures.
//!
//! Keys derive along BIP-44 coin type 194 with `bitcoin::bip32`. Public keys
//! print in the legacy `EOS...` form or as `PUB_K1_...`; private keys as
//! legacy WIF or `PVT_K1_...`; signatures as `SIG_K1_...`.

#![warn(missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod deriver;
mod error;
pub mod keys;
pub mod signature;

pub use deriver::{DerivedKey, Deriver, COIN_TYPE};
pub use error::Error;
pub use keys::{PrivateKey, PublicKey};
pub use signature::Signature;

/// A convenient Result type alias for meridian-eos operations.
pub type Result<T> = core::result::Result<T, Error>;
