//! # Meridian - core types for a multi-chain HD key facade
//!
//! This crate holds the pieces every chain shares:
//!
//! - [`Wallet`]: a BIP-39 mnemonic (or raw seed) and the derived binary seed
//! - [`DerivationPath`]: typed BIP-32 paths with BIP-44 helpers
//! - [`hash`] and [`encoding`]: the digests and Base58Check framing used by
//!   address and key formats
//! - [`seal`]: password-based sealed boxes (Argon2id + AES-256-GCM)
//! - [`node`]: BIP-32 extended keys over `k256` for the account-model chains
//!
//! Chain-specific derivation, address encoding and signing live in the
//! `meridian-btc`, `meridian-eth`, `meridian-eos` and `meridian-xrp` crates.
//!
//! # Example
//!
//! ```
//! use meridian::{DerivationPath, Wallet};
//!
//! let wallet = Wallet::from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None,
//! )?;
//! assert_eq!(wallet.seed().len(), 64);
//!
//! let path: DerivationPath = "m/44'/0'/0'/0/0".parse()?;
//! assert_eq!(path.depth(), 5);
//! # Ok::<(), meridian::Error>(())
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown
)]
#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod hash;
pub mod hdpath;
pub mod node;
pub mod seal;
mod wallet;

pub use error::{Error, Result};
pub use hdpath::{ChildIndex, DerivationPath};
pub use wallet::{Wallet, MAX_SEED_LEN, MIN_SEED_LEN};
