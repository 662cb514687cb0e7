//! Error types for XRP Ledger key operations.

use meridian::node::NodeError;

/// Errors that can occur during XRP Ledger key operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Mnemonic, path or encoding error from the core crate.
    #[error(transparent)]
    Core(#[from] meridian::Error),

    /// BIP32 derivation error.
    #[error("BIP32 derivation error: {0}")]
    Bip32(#[from] bip32::Error),

    /// Public key bytes are not a valid secp256k1 point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Address does not decode as a classic `r...` address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Signature is not valid DER.
    #[error("invalid signature")]
    InvalidSignature,

    /// Extended key does not parse or is not an `xprv`/`xpub`.
    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),

    /// A watch-only deriver was asked for private material.
    #[error("watch-only key: no private key available")]
    WatchOnly,

    /// A hardened step was requested from an extended public key.
    #[error("cannot derive hardened path {0} from an extended public key")]
    HardenedFromPublic(String),
}

impl From<NodeError> for Error {
    fn from(err: NodeError) -> Self {
        match err {
            NodeError::Bip32(e) => Self::Bip32(e),
            NodeError::InvalidExtendedKey(reason) => Self::InvalidExtendedKey(reason),
            NodeError::HardenedFromPublic(path) => Self::HardenedFromPublic(path),
            other => Self::InvalidExtendedKey(other.to_string()),
        }
    }
}
