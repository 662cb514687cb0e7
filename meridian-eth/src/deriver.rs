//! Ethereum address derivation from a wallet seed or extended key.

use core::fmt;

use k256::ecdsa::SigningKey;
use meridian::node::Node;
use meridian::{DerivationPath, Wallet};
use zeroize::Zeroizing;

use crate::address::{public_key_to_address, to_checksum_address};
use crate::derivation_style::{DerivationStyle, COIN_TYPE};
use crate::{eip191, Error};

const PURPOSE: u32 = 44;

/// Ethereum address deriver.
///
/// Paths are applied relative to the root: the seed's master key, or an
/// imported `xprv`/`xpub`.
///
/// # Example
///
/// ```
/// use meridian::Wallet;
/// use meridian_eth::{DerivationStyle, Deriver};
///
/// let wallet = Wallet::from_mnemonic(
///     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
///     None,
/// )?;
/// let deriver = Deriver::new(&wallet)?;
/// let addr = deriver.derive(0, false, 0)?;
/// assert_eq!(addr.address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
///
/// let live = deriver.derive_with_style(DerivationStyle::LedgerLive, 1)?;
/// assert_eq!(live.path.to_string(), "m/44'/60'/1'/0/0");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Deriver {
    root: Node,
}

/// A derived Ethereum address with associated keys.
#[derive(Debug, Clone)]
pub struct DerivedAddress {
    /// Derivation path used, relative to the deriver's root.
    pub path: DerivationPath,
    /// Private key in hex without `0x`, `None` for watch-only derivers.
    pub private_key_hex: Option<Zeroizing<String>>,
    /// Uncompressed public key in hex (`04` prefix).
    pub public_key_hex: String,
    /// Checksummed address (EIP-55).
    pub address: String,
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

    /// Create a deriver rooted at an `xprv` key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtendedKey`] if the key is not a mainnet
    /// extended private key.
    pub fn from_xprv(xprv: &str) -> Result<Self, Error> {
        Ok(Self {
            root: Node::from_xprv(xprv)?,
        })
    }

    /// Create a watch-only deriver rooted at an `xpub` key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtendedKey`] if the key is not a mainnet
    /// extended public key.
    pub fn from_xpub(xpub: &str) -> Result<Self, Error> {
        Ok(Self {
            root: Node::from_xpub(xpub)?,
        })
    }

    /// Standard path `m/44'/60'/account'/change/index`, or `m/change/index`
    /// when rooted at an imported account key.
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

    /// Derive an address using the BIP-44 path.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    #[inline]
    pub fn derive(&self, account: u32, change: bool, index: u32) -> Result<DerivedAddress, Error> {
        self.derive_at_path(&self.default_path(account, change, index)?)
    }

    /// Derive an address at a custom path.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails, or [`Error::HardenedFromPublic`]
    /// for hardened steps on a watch-only deriver.
    pub fn derive_at_path(&self, path: &DerivationPath) -> Result<DerivedAddress, Error> {
        let node = self.root.derive(path)?;
        let public_key = node.verifying_key();
        let private_key = node
            .signing_key()
            .map(|key| Zeroizing::new(hex::encode(key.to_bytes())));

        Ok(DerivedAddress {
            path: path.clone(),
            private_key_hex: private_key,
            public_key_hex: hex::encode(public_key.to_encoded_point(false).as_bytes()),
            address: to_checksum_address(&public_key_to_address(&public_key)),
        })
    }

    /// Derive `count` consecutive addresses starting at `start`.
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

    /// Derive an address using a wallet-specific path style.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    #[inline]
    pub fn derive_with_style(&self, style: DerivationStyle, index: u32) -> Result<DerivedAddress, Error> {
        self.derive_at_path(&style.path(index)?)
    }

    /// Derive `count` addresses with a path style.
    ///
    /// # Errors
    ///
    /// Returns an error if any derivation fails.
    pub fn derive_many_with_style(
        &self,
        style: DerivationStyle,
        start: u32,
        count: u32,
    ) -> Result<Vec<DerivedAddress>, Error> {
        (start..start.saturating_add(count))
            .map(|index| self.derive_with_style(style, index))
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

    /// EIP-191 personal-message signature by the key at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn sign_message(&self, path: &DerivationPath, message: &[u8]) -> Result<String, Error> {
        eip191::sign_message(&self.signing_key(path)?, message)
    }

    /// Verify a personal-message signature against an address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address or signature is malformed.
    pub fn verify_message(&self, address: &str, message: &[u8], signature_hex: &str) -> Result<bool, Error> {
        eip191::verify_message(address, message, signature_hex)
    }

    /// Sign a 32-byte digest, returning `0x`-hex `r || s || recid`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn sign_digest(&self, path: &DerivationPath, digest: &[u8; 32]) -> Result<String, Error> {
        let signature = eip191::sign_prehash(&self.signing_key(path)?, digest)?;
        Ok(format!("0x{}", hex::encode(signature)))
    }

    /// Verify a digest signature against a public key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or signature is malformed.
    pub fn verify_digest(&self, public_key_hex: &str, digest: &[u8; 32], signature_hex: &str) -> Result<bool, Error> {
        eip191::verify_digest(public_key_hex, digest, signature_hex)
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

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_deriver() -> Deriver {
        Deriver::new(&Wallet::from_mnemonic(TEST_MNEMONIC, None).unwrap()).unwrap()
    }

    #[test]
    fn test_derive_address() {
        let addr = test_deriver().derive(0, false, 0).unwrap();
        assert_eq!(addr.address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
        assert_eq!(addr.path.to_string(), "m/44'/60'/0'/0/0");
        assert!(addr.public_key_hex.starts_with("04"));
        assert_eq!(addr.public_key_hex.len(), 130);
        assert_eq!(addr.private_key_hex.as_ref().unwrap().len(), 64);
    }

    #[test]
    fn test_derive_many_unique() {
        let addrs = test_deriver().derive_many(0, false, 0, 5).unwrap();
        assert_eq!(addrs.len(), 5);
        for (i, a) in addrs.iter().enumerate() {
            assert!(addrs[i + 1..].iter().all(|b| b.address != a.address));
        }
    }

    #[test]
    fn test_passphrase_changes_addresses() {
        let plain = test_deriver().derive(0, false, 0).unwrap();
        let wallet = Wallet::from_mnemonic(TEST_MNEMONIC, Some("password")).unwrap();
        let salted = Deriver::new(&wallet).unwrap().derive(0, false, 0).unwrap();
        assert_ne!(plain.address, salted.address);
    }

    #[test]
    fn test_styles_differ() {
        let deriver = test_deriver();
        let addrs: Vec<_> = DerivationStyle::ALL
            .iter()
            .map(|&s| deriver.derive_with_style(s, 1).unwrap().address)
            .collect();
        assert_ne!(addrs[0], addrs[1]);
        assert_ne!(addrs[0], addrs[2]);
        assert_ne!(addrs[1], addrs[2]);

        let live = deriver.derive_many_with_style(DerivationStyle::LedgerLive, 0, 3).unwrap();
        assert_eq!(live[2].path.to_string(), "m/44'/60'/2'/0/0");
        assert_eq!(live[0].address, deriver.derive(0, false, 0).unwrap().address);
    }

    #[test]
    fn test_xpub_watch_only() {
        let deriver = test_deriver();
        let account: DerivationPath = "m/44'/60'/0'".parse().unwrap();
        let xpub = deriver.extended_public_key(&account).unwrap();
        assert!(xpub.starts_with("xpub"));

        let watch = Deriver::from_xpub(&xpub).unwrap();
        assert!(watch.is_watch_only());
        let watched = watch.derive(0, false, 0).unwrap();
        assert_eq!(watched.path.to_string(), "m/0/0");
        assert_eq!(watched.address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
        assert!(watched.private_key_hex.is_none());

        let path = watched.path.clone();
        assert!(matches!(watch.sign_message(&path, b"x"), Err(Error::WatchOnly)));
        assert!(matches!(watch.extended_private_key(&path), Err(Error::WatchOnly)));
        assert!(matches!(
            watch.derive_at_path(&"m/0'".parse().unwrap()),
            Err(Error::HardenedFromPublic(_))
        ));
    }

    #[test]
    fn test_xprv_import() {
        let deriver = test_deriver();
        let account: DerivationPath = "m/44'/60'/0'".parse().unwrap();
        let xprv = deriver.extended_private_key(&account).unwrap();
        let imported = Deriver::from_xprv(&xprv).unwrap();
        assert!(!imported.is_watch_only());
        assert_eq!(
            imported.derive(0, false, 0).unwrap().address,
            "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
        );

        assert!(Deriver::from_xprv(&deriver.extended_public_key(&account).unwrap()).is_err());
        assert!(Deriver::from_xpub(&xprv).is_err());
    }

    #[test]
    fn test_sign_verify() {
        let deriver = test_deriver();
        let addr = deriver.derive(0, false, 0).unwrap();
        let sig = deriver.sign_message(&addr.path, b"hello").unwrap();
        assert!(deriver.verify_message(&addr.address, b"hello", &sig).unwrap());

        let digest = meridian::hash::keccak256(b"tx");
        let sig = deriver.sign_digest(&addr.path, &digest).unwrap();
        assert!(deriver.verify_digest(&addr.public_key_hex, &digest, &sig).unwrap());
    }
}
