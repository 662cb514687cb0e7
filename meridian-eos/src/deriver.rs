//! EOS key derivation along `m/44'/194'/account'/change/index`.

use core::fmt;
use core::str::FromStr;

use bitcoin::bip32::{ChildNumber, Xpriv, Xpub};
use bitcoin::secp256k1::{All, Secp256k1};
use bitcoin::NetworkKind;
use meridian::hash::sha256;
use meridian::{DerivationPath, Wallet};
use zeroize::Zeroizing;

use crate::keys::{PrivateKey, PublicKey};
use crate::signature::{self, Signature};
use crate::Error;

/// BIP-44 coin type for EOS.
pub const COIN_TYPE: u32 = 194;
const PURPOSE: u32 = 44;

enum Root {
    Private(Xpriv),
    Public(Xpub),
}

/// EOS key deriver.
pub struct Deriver {
    root: Root,
    secp: Secp256k1<All>,
}

/// A derived EOS key pair.
#[derive(Debug, Clone)]
pub struct DerivedKey {
    /// Derivation path used, relative to the deriver's root.
    pub path: DerivationPath,
    /// Legacy WIF private key, `None` for watch-only derivers.
    pub private_key_wif: Option<Zeroizing<String>>,
    /// `PVT_K1_` private key, `None` for watch-only derivers.
    pub private_key_k1: Option<Zeroizing<String>>,
    /// Legacy `EOS...` public key.
    pub public_key: String,
    /// `PUB_K1_...` public key.
    pub public_key_k1: String,
}

fn to_bip32_path(path: &DerivationPath) -> bitcoin::bip32::DerivationPath {
    path.to_u32_vec().into_iter().map(ChildNumber::from).collect()
}

impl Deriver {
    /// Create a deriver rooted at the wallet's master key.
    ///
    /// # Errors
    ///
    /// Returns an error if the master key derivation fails.
    pub fn new(wallet: &Wallet) -> Result<Self, Error> {
        Ok(Self {
            root: Root::Private(Xpriv::new_master(NetworkKind::Main, wallet.seed())?),
            secp: Secp256k1::new(),
        })
    }

    /// Create a deriver rooted at a mainnet `xprv`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtendedKey`] if the key does not parse.
    pub fn from_xprv(xprv: &str) -> Result<Self, Error> {
        let root = Xpriv::from_str(xprv.trim()).map_err(|e| Error::InvalidExtendedKey(e.to_string()))?;
        if root.network != NetworkKind::Main {
            return Err(Error::InvalidExtendedKey("expected a mainnet xprv".to_owned()));
        }
        Ok(Self {
            root: Root::Private(root),
            secp: Secp256k1::new(),
        })
    }

    /// Create a watch-only deriver rooted at a mainnet `xpub`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtendedKey`] if the key does not parse.
    pub fn from_xpub(xpub: &str) -> Result<Self, Error> {
        let root = Xpub::from_str(xpub.trim()).map_err(|e| Error::InvalidExtendedKey(e.to_string()))?;
        if root.network != NetworkKind::Main {
            return Err(Error::InvalidExtendedKey("expected a mainnet xpub".to_owned()));
        }
        Ok(Self {
            root: Root::Public(root),
            secp: Secp256k1::new(),
        })
    }

    /// Standard path, or `m/change/index` below an imported account key.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range.
    pub fn default_path(&self, account: u32, change: bool, index: u32) -> Result<DerivationPath, Error> {
        let change = u32::from(change);
        let depth = match &self.root {
            Root::Private(xprv) => xprv.depth,
            Root::Public(xpub) => xpub.depth,
        };
        if depth == 0 {
            Ok(DerivationPath::bip44(PURPOSE, COIN_TYPE, account, change, index)?)
        } else {
            Ok(DerivationPath::master().normal_child(change)?.normal_child(index)?)
        }
    }

    /// Derive the key pair at the standard path.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    pub fn derive(&self, account: u32, change: bool, index: u32) -> Result<DerivedKey, Error> {
        self.derive_at_path(&self.default_path(account, change, index)?)
    }

    /// Derive the key pair at a custom path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HardenedFromPublic`] for hardened steps on a
    /// watch-only deriver.
    pub fn derive_at_path(&self, path: &DerivationPath) -> Result<DerivedKey, Error> {
        let (public_key, private_key) = self.derive_keys(path)?;
        Ok(DerivedKey {
            path: path.clone(),
            private_key_wif: private_key.as_ref().map(PrivateKey::to_wif),
            private_key_k1: private_key.as_ref().map(PrivateKey::to_k1_string),
            public_key: public_key.to_legacy_string(),
            public_key_k1: public_key.to_k1_string(),
        })
    }

    /// Derive `count` consecutive key pairs starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if any derivation fails.
    pub fn derive_many(
        &self,
        account: u32,
        change: bool,
        start: u32,
        count: u32,
    ) -> Result<Vec<DerivedKey>, Error> {
        (start..start.saturating_add(count))
            .map(|index| self.derive(account, change, index))
            .collect()
    }

    /// `xprv` at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn extended_private_key(&self, path: &DerivationPath) -> Result<Zeroizing<String>, Error> {
        match &self.root {
            Root::Private(xprv) => Ok(Zeroizing::new(
                xprv.derive_priv(&self.secp, &to_bip32_path(path))?.to_string(),
            )),
            Root::Public(_) => Err(Error::WatchOnly),
        }
    }

    /// `xpub` at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    pub fn extended_public_key(&self, path: &DerivationPath) -> Result<String, Error> {
        let xpub = match &self.root {
            Root::Private(xprv) => {
                Xpub::from_priv(&self.secp, &xprv.derive_priv(&self.secp, &to_bip32_path(path))?)
            }
            Root::Public(xpub) => {
                Self::check_public_path(path)?;
                xpub.derive_pub(&self.secp, &to_bip32_path(path))?
            }
        };
        Ok(xpub.to_string())
    }

    /// Sign `sha256(data)` with the key at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn sign_message(&self, path: &DerivationPath, data: &[u8]) -> Result<String, Error> {
        self.sign_digest(path, &sha256(data))
    }

    /// Verify a `SIG_K1_` signature over `sha256(data)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or signature string is malformed or the
    /// signature is not canonical.
    pub fn verify_message(&self, public_key: &str, data: &[u8], signature: &str) -> Result<bool, Error> {
        signature::verify_message(&self.secp, public_key, data, signature)
    }

    /// Sign a 32-byte digest with the key at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn sign_digest(&self, path: &DerivationPath, digest: &[u8; 32]) -> Result<String, Error> {
        match self.derive_keys(path)? {
            (_, Some(private_key)) => Ok(Signature::sign(&self.secp, &private_key, digest)?.to_string()),
            (_, None) => Err(Error::WatchOnly),
        }
    }

    /// Verify a `SIG_K1_` signature over a digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or signature string is malformed.
    pub fn verify_digest(&self, public_key: &str, digest: &[u8; 32], signature: &str) -> Result<bool, Error> {
        signature::verify_digest(&self.secp, public_key, digest, signature)
    }

    /// Check whether this deriver holds no private key.
    #[must_use]
    pub const fn is_watch_only(&self) -> bool {
        matches!(self.root, Root::Public(_))
    }

    fn check_public_path(path: &DerivationPath) -> Result<(), Error> {
        if path.has_hardened() {
            return Err(Error::HardenedFromPublic(path.to_string()));
        }
        Ok(())
    }

    fn derive_keys(&self, path: &DerivationPath) -> Result<(PublicKey, Option<PrivateKey>), Error> {
        match &self.root {
            Root::Private(xprv) => {
                let child = xprv.derive_priv(&self.secp, &to_bip32_path(path))?;
                let private_key = PrivateKey::new(child.private_key);
                Ok((private_key.public_key(&self.secp), Some(private_key)))
            }
            Root::Public(xpub) => {
                Self::check_public_path(path)?;
                let child = xpub.derive_pub(&self.secp, &to_bip32_path(path))?;
                Ok((PublicKey::new(child.public_key), None))
            }
        }
    }
}

impl fmt::Debug for Deriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deriver")
            .field("watch_only", &self.is_watch_only())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_deriver() -> Deriver {
        Deriver::new(&Wallet::from_mnemonic(TEST_MNEMONIC, None).unwrap()).unwrap()
    }

    #[test]
    fn test_derive_formats() {
        let key = test_deriver().derive(0, false, 0).unwrap();
        assert_eq!(key.path.to_string(), "m/44'/194'/0'/0/0");
        assert!(key.public_key.starts_with("EOS"));
        assert!(key.public_key_k1.starts_with("PUB_K1_"));
        assert!(key.private_key_wif.as_ref().unwrap().starts_with('5'));
        assert!(key.private_key_k1.as_ref().unwrap().starts_with("PVT_K1_"));

        let legacy: PublicKey = key.public_key.parse().unwrap();
        let k1: PublicKey = key.public_key_k1.parse().unwrap();
        assert_eq!(legacy, k1);
    }

    #[test]
    fn test_wif_matches_public_key() {
        let key = test_deriver().derive(0, false, 1).unwrap();
        let private: PrivateKey = key.private_key_wif.as_ref().unwrap().parse().unwrap();
        let secp = Secp256k1::new();
        assert_eq!(private.public_key(&secp).to_legacy_string(), key.public_key);
    }

    #[test]
    fn test_sign_verify() {
        let deriver = test_deriver();
        let key = deriver.derive(0, false, 0).unwrap();
        let sig = deriver.sign_message(&key.path, b"transfer").unwrap();
        assert!(sig.starts_with("SIG_K1_"));
        assert!(deriver.verify_message(&key.public_key, b"transfer", &sig).unwrap());
        assert!(deriver.verify_message(&key.public_key_k1, b"transfer", &sig).unwrap());
        assert!(!deriver.verify_message(&key.public_key, b"other", &sig).unwrap());

        let other = deriver.derive(0, false, 1).unwrap();
        assert!(!deriver.verify_message(&other.public_key, b"transfer", &sig).unwrap());
        assert!(deriver.verify_message("EOS1", b"transfer", &sig).is_err());
    }

    #[test]
    fn test_watch_only() {
        let deriver = test_deriver();
        let account: DerivationPath = "m/44'/194'/0'".parse().unwrap();
        let watch = Deriver::from_xpub(&deriver.extended_public_key(&account).unwrap()).unwrap();
        assert!(watch.is_watch_only());

        let watched = watch.derive(0, false, 0).unwrap();
        assert_eq!(watched.public_key, deriver.derive(0, false, 0).unwrap().public_key);
        assert!(watched.private_key_wif.is_none());
        assert!(matches!(watch.sign_digest(&watched.path, &[1; 32]), Err(Error::WatchOnly)));

        let imported = Deriver::from_xprv(&deriver.extended_private_key(&account).unwrap()).unwrap();
        assert_eq!(
            imported.derive(0, false, 3).unwrap().public_key,
            deriver.derive(0, false, 3).unwrap().public_key
        );
    }
}
