//! The chain-agnostic keychain interface.

use meridian::DerivationPath;
use zeroize::Zeroizing;

use crate::{Blockchain, Network, Result};

/// A key derived by a [`Keychain`].
#[derive(Debug, Clone)]
pub struct DerivedKey {
    /// Derivation path, relative to the keychain root.
    pub path: DerivationPath,
    /// Address in the chain's format. EOS has no addresses and reports the
    /// legacy `EOS...` public key here.
    pub address: String,
    /// Public key in the chain's customary form.
    pub public_key: String,
    /// Private key in the chain's customary form; `None` when watch-only.
    pub private_key: Option<Zeroizing<String>>,
}

/// HD keychain for one blockchain on one network.
pub trait Keychain: Send + Sync {
    /// Blockchain served.
    fn blockchain(&self) -> Blockchain;

    /// Network served.
    fn network(&self) -> Network;

    /// Whether the root holds no private key.
    fn is_watch_only(&self) -> bool;

    /// Conventional path for the given position. Below an imported
    /// account-level key this is `m/change/index`.
    fn default_path(&self, account: u32, change: bool, index: u32) -> Result<DerivationPath>;

    /// Derive the key at `path`.
    fn derive(&self, path: &DerivationPath) -> Result<DerivedKey>;

    /// Derive `count` keys at consecutive indices from `start`.
    fn derive_many(&self, account: u32, change: bool, start: u32, count: u32) -> Result<Vec<DerivedKey>> {
        (start..start.saturating_add(count))
            .map(|index| self.derive(&self.default_path(account, change, index)?))
            .collect()
    }

    /// Extended public key at `path`.
    fn extended_public_key(&self, path: &DerivationPath) -> Result<String>;

    /// Extended private key at `path`.
    fn extended_private_key(&self, path: &DerivationPath) -> Result<Zeroizing<String>>;

    /// Sign a message with the key at `path` using the chain's message scheme.
    fn sign_message(&self, path: &DerivationPath, message: &[u8]) -> Result<String>;

    /// Verify a message signature. `public` is an address for the Bitcoin
    /// family and ETH, an EOS public key, or an XRP public key hex.
    fn verify_message(&self, public: &str, message: &[u8], signature: &str) -> Result<bool>;

    /// Sign a raw 32-byte digest with the key at `path`.
    fn sign_digest(&self, path: &DerivationPath, digest: &[u8; 32]) -> Result<String>;

    /// Verify a digest signature against a public key.
    fn verify_digest(&self, public: &str, digest: &[u8; 32], signature: &str) -> Result<bool>;

    /// Whether `address` is valid on this chain and network.
    fn is_valid_address(&self, address: &str) -> bool;
}
