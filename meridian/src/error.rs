//! Error types for core wallet operations.

/// Errors that can occur in the core wallet, path and sealing layers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid mnemonic phrase.
    #[error("mnemonic error: {0}")]
    Mnemonic(#[from] bip39::Error),

    /// Invalid word count for mnemonic.
    #[error("invalid word count {0}, must be 12, 15, 18, 21, or 24")]
    InvalidWordCount(usize),

    /// Seed length outside the BIP-32 range of 16..=64 bytes.
    #[error("invalid seed length {0}, must be between 16 and 64 bytes")]
    InvalidSeedLength(usize),

    /// Malformed derivation path or child index.
    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    /// Input is not valid hex / base58 / base64.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// Base58Check checksum mismatch.
    #[error("checksum mismatch")]
    InvalidChecksum,

    /// Decoded data has the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Empty password provided for a sealing operation.
    #[error("password must not be empty")]
    EmptyPassword,

    /// Password key derivation failed.
    #[error("password key derivation failed")]
    KeyDerivation,

    /// Sealed box is truncated, malformed, or has an unknown version.
    #[error("malformed sealed box")]
    InvalidSealedBox,

    /// Authentication failed: wrong password or tampered data.
    #[error("decryption failed: wrong password or corrupted data")]
    Decryption,
}

/// A convenient Result type alias for core operations.
pub type Result<T> = core::result::Result<T, Error>;
