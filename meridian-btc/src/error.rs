//! Error types for Bitcoin-family wallet operations.

use crate::{AddressType, Coin};

/// Errors that can occur during Bitcoin-family wallet operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Mnemonic, path or encoding error from the core crate.
    #[error(transparent)]
    Core(#[from] meridian::Error),

    /// BIP32 derivation error.
    #[error("BIP32 derivation error: {0}")]
    Bip32(#[from] bitcoin::bip32::Error),

    /// Secp256k1 error.
    #[error("secp256k1 error: {0}")]
    Secp256k1(#[from] bitcoin::secp256k1::Error),

    /// WIF does not decode or belongs to another coin.
    #[error("invalid WIF private key")]
    InvalidWif,

    /// Private key bytes are not a valid secp256k1 scalar.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Public key bytes are not a valid secp256k1 point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Address does not decode for this coin and network.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Extended key does not decode or carries another chain's version bytes.
    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),

    /// Signature is malformed.
    #[error("invalid signature")]
    InvalidSignature,

    /// The coin has no encoding for this address type.
    #[error("{coin} does not support {address_type} addresses")]
    UnsupportedAddressType {
        /// Coin the address was requested for.
        coin: Coin,
        /// Requested address type.
        address_type: AddressType,
    },

    /// An uncompressed key was used with an address type that cannot encode it.
    #[error("{0} addresses require a compressed public key")]
    UncompressedKey(AddressType),

    /// A watch-only deriver was asked for private material.
    #[error("watch-only key: no private key available")]
    WatchOnly,

    /// A hardened step was requested from an extended public key.
    #[error("cannot derive hardened path {0} from an extended public key")]
    HardenedFromPublic(String),
}
