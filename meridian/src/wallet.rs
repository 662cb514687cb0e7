//! Unified wallet type for multi-chain key derivation.

use bip39::Mnemonic;
use zeroize::Zeroizing;

use crate::Error;

/// Shortest seed accepted by BIP-32 master key generation.
pub const MIN_SEED_LEN: usize = 16;
/// Longest seed accepted by BIP-32 master key generation.
pub const MAX_SEED_LEN: usize = 64;

/// A unified HD wallet that can derive keys for multiple blockchains.
///
/// The wallet holds a BIP39 mnemonic (when created from one) and the binary
/// seed every chain crate derives its master key from.
///
/// # Passphrase Support
///
/// The optional BIP39 passphrase (the "25th word") is mixed into the seed, so
/// the same mnemonic with different passphrases yields unrelated wallets.
pub struct Wallet {
    /// BIP39 mnemonic phrase, absent for raw-seed wallets.
    mnemonic: Option<Zeroizing<String>>,
    /// Seed bytes used for master key generation.
    seed: Zeroizing<Vec<u8>>,
    /// Whether a non-empty passphrase was used.
    has_passphrase: bool,
}

impl Wallet {
    /// Generate a new wallet with a random mnemonic.
    ///
    /// # Errors
    ///
    /// Returns an error if the word count is not 12, 15, 18, 21 or 24.
    #[cfg(feature = "rand")]
    pub fn generate(word_count: usize, passphrase: Option<&str>) -> Result<Self, Error> {
        if !matches!(word_count, 12 | 15 | 18 | 21 | 24) {
            return Err(Error::InvalidWordCount(word_count));
        }

        let mnemonic = Mnemonic::generate(word_count)?;
        Self::from_mnemonic(mnemonic.to_string().as_str(), passphrase)
    }

    /// Create a wallet from raw entropy bytes (16, 20, 24, 28 or 32 bytes).
    ///
    /// # Errors
    ///
    /// Returns an error if the entropy length is invalid.
    pub fn from_entropy(entropy: &[u8], passphrase: Option<&str>) -> Result<Self, Error> {
        let mnemonic = Mnemonic::from_entropy(entropy)?;
        Self::from_mnemonic(mnemonic.to_string().as_str(), passphrase)
    }

    /// Create a wallet from an existing English mnemonic phrase.
    ///
    /// # Errors
    ///
    /// Returns an error if a word is unknown or the checksum does not match.
    pub fn from_mnemonic(phrase: &str, passphrase: Option<&str>) -> Result<Self, Error> {
        let mnemonic: Mnemonic = phrase.parse()?;
        let passphrase_str = passphrase.unwrap_or("");
        let seed_bytes = Zeroizing::new(mnemonic.to_seed(passphrase_str));

        Ok(Self {
            mnemonic: Some(Zeroizing::new(mnemonic.to_string())),
            seed: Zeroizing::new(seed_bytes.to_vec()),
            has_passphrase: !passphrase_str.is_empty(),
        })
    }

    /// Create a wallet directly from seed bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeedLength`] unless the seed is 16..=64 bytes.
    pub fn from_seed(seed: &[u8]) -> Result<Self, Error> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(Error::InvalidSeedLength(seed.len()));
        }

        Ok(Self {
            mnemonic: None,
            seed: Zeroizing::new(seed.to_vec()),
            has_passphrase: false,
        })
    }

    /// Get the mnemonic phrase, if the wallet was built from one.
    ///
    /// **Security Warning**: this value reconstructs every derived key.
    #[inline]
    #[must_use]
    pub fn mnemonic(&self) -> Option<&str> {
        self.mnemonic.as_deref().map(String::as_str)
    }

    /// Get the seed bytes for master key generation.
    #[inline]
    #[must_use]
    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    /// Check if a passphrase was used to derive the seed.
    #[must_use]
    pub const fn has_passphrase(&self) -> bool {
        self.has_passphrase
    }

    /// Get the word count of the mnemonic (0 for raw-seed wallets).
    #[inline]
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.mnemonic()
            .map_or(0, |phrase| phrase.split_whitespace().count())
    }
}

impl core::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Wallet")
            .field("word_count", &self.word_count())
            .field("has_passphrase", &self.has_passphrase)
            .finish_non_exhaustive()
    }
}
