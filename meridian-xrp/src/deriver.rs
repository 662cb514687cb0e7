//! XRP Ledger key derivation along `m/44'/144'/account'/change/index`.

use core::fmt;

use k256::ecdsa::{SigningKey, VerifyingKey};
use meridian::node::Node;
use meridian::{DerivationPath, Wallet};
use zeroize::Zeroizing;

use crate::address::public_key_to_address;
use crate::{signing, Error};

/// BIP-44 coin type for XRP.
pub const COIN_TYPE: u32 = 144;
const PURPOSE: u32 = 44;

/// XRP Ledger key deriver.
pub struct Deriver {
    root: Node,
}

/// A derived XRP Ledger account.
#[derive(Debug, Clone)]
pub struct DerivedAddress {
    /// Derivation path used, relative to the deriver's root.
    pub path: DerivationPath,
    /// Private key in hex, `None` for watch-only derivers.
    pub private_key_hex: Option<Zeroizing<String>>,
    /// Compressed public key in upper-case hex, as the ledger shows it.
    pub public_key_hex: String,
    /// Classic `r...` address.
    pub address: String,
}

fn compressed(key: &VerifyingKey) -> [u8; 33] {
    let mut out = [0u8; 33];
    out.copy_from_slice(key.to_encoded_point(true).as_bytes());
    out
}

impl Deriver {
    /// Create a deriver rooted at the wallet's master key.
    ///
    /// # Errors
    ///
    /// Returns an error if the master key derivation fails.
    pub fn new(wallet: &Wallet) -> Result<Self, Error> {
        Ok(Self {
            root: Node::master(wallet)?,
        })
    }

    /// Create a deriver rooted at an `xprv`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtendedKey`] if the key is not an `xprv`.
    pub fn from_xprv(xprv: &str) -> Result<Self, Error> {
        Ok(Self {
            root: Node::from_xprv(xprv)?,
        })
    }

    /// Create a watch-only deriver rooted at an `xpub`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtendedKey`] if the key is not an `xpub`.
    pub fn from_xpub(xpub: &str) -> Result<Self, Error> {
        Ok(Self {
            root: Node::from_xpub(xpub)?,
        })
    }

    /// Standard path, or `m/change/index` below an imported account key.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range.
    pub fn default_path(&self, account: u32, change: bool, index: u32) -> Result<DerivationPath, Error> {
        let change = u32::from(change);
        if self.root.depth() == 0 {
            Ok(DerivationPath::bip44(PURPOSE, COIN_TYPE, account, change, index)?)
        } else {
            Ok(DerivationPath::master().normal_child(change)?.normal_child(index)?)
        }
    }

    /// Derive the account at the standard path.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    pub fn derive(&self, account: u32, change: bool, index: u32) -> Result<DerivedAddress, Error> {
        self.derive_at_path(&self.default_path(account, change, index)?)
    }

    /// Derive the account at a custom path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HardenedFromPublic`] for hardened steps on a
    /// watch-only deriver.
    pub fn derive_at_path(&self, path: &DerivationPath) -> Result<DerivedAddress, Error> {
        let node = self.root.derive(path)?;
        let private_key_hex = node
            .signing_key()
            .map(|key| Zeroizing::new(hex::encode_upper(key.to_bytes())));
        let public_key = compressed(&node.verifying_key());

        Ok(DerivedAddress {
            path: path.clone(),
            private_key_hex,
            public_key_hex: hex::encode_upper(public_key),
            address: public_key_to_address(&public_key),
        })
    }

    /// Derive `count` consecutive accounts starting at `start`.
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
    ) -> Result<Vec<DerivedAddress>, Error> {
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
        self.root.derive(path)?.to_xprv().ok_or(Error::WatchOnly)
    }

    /// `xpub` at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    pub fn extended_public_key(&self, path: &DerivationPath) -> Result<String, Error> {
        Ok(self.root.derive(path)?.to_xpub())
    }

    /// Sign `sha512_half(data)` with the key at `path`; DER hex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn sign_message(&self, path: &DerivationPath, data: &[u8]) -> Result<String, Error> {
        signing::sign_message(&self.signing_key(path)?, data)
    }

    /// Verify a message signature against a hex public key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or signature does not decode.
    pub fn verify_message(&self, public_key_hex: &str, data: &[u8], signature_hex: &str) -> Result<bool, Error> {
        signing::verify_message(public_key_hex, data, signature_hex)
    }

    /// Sign a raw 32-byte digest with the key at `path`; DER hex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn sign_digest(&self, path: &DerivationPath, digest: &[u8; 32]) -> Result<String, Error> {
        signing::sign_digest(&self.signing_key(path)?, digest)
    }

    /// Verify a digest signature against a hex public key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or signature does not decode.
    pub fn verify_digest(&self, public_key_hex: &str, digest: &[u8; 32], signature_hex: &str) -> Result<bool, Error> {
        signing::verify_digest(public_key_hex, digest, signature_hex)
    }

    /// Check whether this deriver holds no private key.
    #[must_use]
    pub const fn is_watch_only(&self) -> bool {
        self.root.is_public()
    }

    fn signing_key(&self, path: &DerivationPath) -> Result<SigningKey, Error> {
        self.root
            .derive(path)?
            .signing_key()
            .cloned()
            .ok_or(Error::WatchOnly)
    }
}

impl fmt::Debug for Deriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deriver")
            .field("watch_only", &self.is_watch_only())
            .finish_non_exhaustive()
    }
}
