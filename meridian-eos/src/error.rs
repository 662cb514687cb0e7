//! Error types for EOS key operations.

/// Errors that can occur during EOS key operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Mnemonic, path or encoding error from the core crate.
    #[error(transparent)]
    Core(#[from] meridian::Error),

    /// BIP32 derivation error.
    #[error("BIP32 derivation error: {0}")]
    Bip32(#[from] bitcoin::bip32::Error),

    /// Public key string is not `EOS...` or `PUB_K1_...`, or fails its checksum.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Private key string is not a WIF or `PVT_K1_...` key.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Signature string is not `SIG_K1_...`, fails its checksum, or is not
    /// canonical.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// No canonical signature was found within the retry budget.
    #[error("failed to produce a canonical signature")]
    SigningFailed,

    /// Extended key does not parse or is not a mainnet key.
    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),

    /// A watch-only deriver was asked for private material.
    #[error("watch-only key: no private key available")]
    WatchOnly,

    /// A hardened step was requested from an extended public key.
    #[error("cannot derive hardened path {0} from an extended public key")]
    HardenedFromPublic(String),
}
