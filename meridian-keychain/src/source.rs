//! Key material a keychain is opened from.

use core::fmt;

use meridian::Wallet;
use zeroize::Zeroizing;

use crate::Error;

/// Where a keychain's root key comes from.
#[derive(Clone)]
pub enum KeySource {
    /// BIP-39 mnemonic with optional passphrase.
    Mnemonic {
        /// Mnemonic phrase.
        phrase: Zeroizing<String>,
        /// BIP-39 passphrase.
        passphrase: Option<Zeroizing<String>>,
    },
    /// Raw BIP-32 seed.
    Seed(Zeroizing<Vec<u8>>),
    /// Extended private key in the chain's own encoding.
    ExtendedPrivateKey(Zeroizing<String>),
    /// Extended public key in the chain's own encoding; watch-only.
    ExtendedPublicKey(String),
}

impl KeySource {
    /// Mnemonic source.
    pub fn mnemonic(phrase: impl Into<String>, passphrase: Option<&str>) -> Self {
        Self::Mnemonic {
            phrase: Zeroizing::new(phrase.into()),
            passphrase: passphrase.map(|p| Zeroizing::new(p.to_owned())),
        }
    }

    /// Seed source.
    pub fn seed(seed: impl Into<Vec<u8>>) -> Self {
        Self::Seed(Zeroizing::new(seed.into()))
    }

    /// Extended private key source.
    pub fn xprv(key: impl Into<String>) -> Self {
        Self::ExtendedPrivateKey(Zeroizing::new(key.into()))
    }

    /// Extended public key source.
    pub fn xpub(key: impl Into<String>) -> Self {
        Self::ExtendedPublicKey(key.into())
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Mnemonic { .. } => "mnemonic",
            Self::Seed(_) => "seed",
            Self::ExtendedPrivateKey(_) => "xprv",
            Self::ExtendedPublicKey(_) => "xpub",
        }
    }

    /// Resolve the root key material.
    pub(crate) fn root(&self) -> Result<Root<'_>, Error> {
        Ok(match self {
            Self::Mnemonic { phrase, passphrase } => Root::Seed(Wallet::from_mnemonic(
                phrase,
                passphrase.as_ref().map(|p| p.as_str()),
            )?),
            Self::Seed(seed) => Root::Seed(Wallet::from_seed(seed)?),
            Self::ExtendedPrivateKey(xprv) => Root::Xprv(xprv),
            Self::ExtendedPublicKey(xpub) => Root::Xpub(xpub),
        })
    }
}

/// Resolved root of a [`KeySource`].
pub(crate) enum Root<'a> {
    Seed(Wallet),
    Xprv(&'a str),
    Xpub(&'a str),
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtendedPublicKey(xpub) => f.debug_tuple("ExtendedPublicKey").field(xpub).finish(),
            other => write!(f, "KeySource::{}([REDACTED])", other.kind()),
        }
    }
}
