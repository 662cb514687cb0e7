//! Bitcoin-family address derivation from a wallet seed or extended key.

use core::fmt;

use bitcoin::bip32::{ChildNumber, Xpriv};
use bitcoin::secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use meridian::{DerivationPath, Wallet};
use zeroize::Zeroizing;

use crate::address::{encode_address, parse_address};
use crate::extended_key::{encode_xprv, encode_xpub, ExtendedKey};
use crate::message;
use crate::wif::encode_wif;
use crate::{AddressType, ChainParams, Coin, Error, Network};

/// Bitcoin-family address deriver.
///
/// The root is either the BIP-32 master key of a seed or an imported
/// extended key. Paths are always applied relative to the root.
pub struct Deriver {
    root: ExtendedKey,
    params: &'static ChainParams,
    secp: Secp256k1<All>,
}

/// A derived address with associated keys.
#[derive(Debug, Clone)]
pub struct DerivedAddress {
    /// Derivation path used, relative to the deriver's root.
    pub path: DerivationPath,
    /// Private key in WIF format, `None` for watch-only derivers.
    pub private_key_wif: Option<Zeroizing<String>>,
    /// Compressed public key in hex format.
    pub public_key_hex: String,
    /// Encoded address.
    pub address: String,
    /// Address type.
    pub address_type: AddressType,
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
    pub fn new(wallet: &Wallet, coin: Coin, network: Network) -> Result<Self, Error> {
        let master = Xpriv::new_master(network.to_network_kind(), wallet.seed())?;
        Ok(Self {
            root: ExtendedKey::Private(master),
            params: ChainParams::get(coin, network),
            secp: Secp256k1::new(),
        })
    }

    /// Create a deriver rooted at an extended private key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtendedKey`] if the key does not parse for
    /// this coin and network, or is an extended public key.
    pub fn from_xprv(xprv: &str, coin: Coin, network: Network) -> Result<Self, Error> {
        let params = ChainParams::get(coin, network);
        match ExtendedKey::decode(xprv, params)? {
            root @ ExtendedKey::Private(_) => Ok(Self {
                root,
                params,
                secp: Secp256k1::new(),
            }),
            ExtendedKey::Public(_) => Err(Error::InvalidExtendedKey(
                "expected a private key, got a public one".to_owned(),
            )),
        }
    }

    /// Create a watch-only deriver rooted at an extended public key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtendedKey`] if the key does not parse for
    /// this coin and network, or is an extended private key.
    pub fn from_xpub(xpub: &str, coin: Coin, network: Network) -> Result<Self, Error> {
        let params = ChainParams::get(coin, network);
        match ExtendedKey::decode(xpub, params)? {
            root @ ExtendedKey::Public(_) => Ok(Self {
                root,
                params,
                secp: Secp256k1::new(),
            }),
            ExtendedKey::Private(_) => Err(Error::InvalidExtendedKey(
                "expected a public key, got a private one".to_owned(),
            )),
        }
    }

    /// Standard path for an address.
    ///
    /// From a master root this is `m/purpose'/coin'/account'/change/index`.
    /// An imported extended key is taken to be an account key, so the path
    /// is `m/change/index` and `account` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range.
    pub fn default_path(
        &self,
        address_type: AddressType,
        account: u32,
        change: bool,
        index: u32,
    ) -> Result<DerivationPath, Error> {
        let change = u32::from(change);
        if self.root_depth() == 0 {
            Ok(DerivationPath::bip44(
                address_type.purpose(),
                self.params.coin_type,
                account,
                change,
                index,
            )?)
        } else {
            Ok(DerivationPath::master()
                .normal_child(change)?
                .normal_child(index)?)
        }
    }

    /// Derive an address using the standard path for `address_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails or the coin does not support
    /// `address_type`.
    pub fn derive(
        &self,
        address_type: AddressType,
        account: u32,
        change: bool,
        index: u32,
    ) -> Result<DerivedAddress, Error> {
        let path = self.default_path(address_type, account, change, index)?;
        self.derive_at_path(&path, address_type)
    }

    /// Derive an address at a custom path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HardenedFromPublic`] for hardened steps on a
    /// watch-only deriver, or [`Error::UnsupportedAddressType`].
    pub fn derive_at_path(
        &self,
        path: &DerivationPath,
        address_type: AddressType,
    ) -> Result<DerivedAddress, Error> {
        let (public_key, secret_key) = self.derive_keys(path)?;
        let address = encode_address(&self.secp, &public_key, self.params, address_type)?;

        Ok(DerivedAddress {
            path: path.clone(),
            private_key_wif: secret_key.map(|sk| encode_wif(self.params, &sk, true)),
            public_key_hex: hex::encode(public_key.serialize()),
            address,
            address_type,
        })
    }

    /// Derive `count` consecutive addresses starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if any derivation fails.
    pub fn derive_many(
        &self,
        address_type: AddressType,
        account: u32,
        change: bool,
        start: u32,
        count: u32,
    ) -> Result<Vec<DerivedAddress>, Error> {
        (start..start.saturating_add(count))
            .map(|index| self.derive(address_type, account, change, index))
            .collect()
    }

    /// Extended public key for an account, with this chain's version bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails; watch-only derivers cannot reach
    /// the hardened account level.
    pub fn account_xpub(&self, address_type: AddressType, account: u32) -> Result<String, Error> {
        let path = DerivationPath::account(address_type.purpose(), self.params.coin_type, account)?;
        self.extended_public_key(&path)
    }

    /// Extended private key at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn extended_private_key(&self, path: &DerivationPath) -> Result<Zeroizing<String>, Error> {
        match &self.root {
            ExtendedKey::Private(xprv) => {
                let child = xprv.derive_priv(&self.secp, &to_bip32_path(path))?;
                Ok(encode_xprv(&child, self.params))
            }
            ExtendedKey::Public(_) => Err(Error::WatchOnly),
        }
    }

    /// Extended public key at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    pub fn extended_public_key(&self, path: &DerivationPath) -> Result<String, Error> {
        let xpub = match &self.root {
            ExtendedKey::Private(xprv) => {
                let child = xprv.derive_priv(&self.secp, &to_bip32_path(path))?;
                bitcoin::bip32::Xpub::from_priv(&self.secp, &child)
            }
            ExtendedKey::Public(xpub) => {
                self.check_public_path(path)?;
                xpub.derive_pub(&self.secp, &to_bip32_path(path))?
            }
        };
        Ok(encode_xpub(&xpub, self.params))
    }

    /// Sign `message` with the key at `path` in the "Signed Message" format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn sign_message(&self, path: &DerivationPath, message: &[u8]) -> Result<String, Error> {
        let secret_key = self.secret_key(path)?;
        Ok(message::sign_message(&self.secp, &secret_key, self.params, message))
    }

    /// Verify a "Signed Message" signature against an address of this chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the address or signature is malformed.
    pub fn verify_message(
        &self,
        address: &str,
        message: &[u8],
        signature_b64: &str,
    ) -> Result<bool, Error> {
        message::verify_message(&self.secp, self.params, address, message, signature_b64)
    }

    /// Sign a 32-byte digest with the key at `path`, returning DER hex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchOnly`] for watch-only derivers.
    pub fn sign_digest(&self, path: &DerivationPath, digest: &[u8; 32]) -> Result<String, Error> {
        let secret_key = self.secret_key(path)?;
        Ok(message::sign_digest(&self.secp, &secret_key, digest))
    }

    /// Verify a DER hex signature over a digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the public key or signature is malformed.
    pub fn verify_digest(
        &self,
        public_key_hex: &str,
        digest: &[u8; 32],
        signature_hex: &str,
    ) -> Result<bool, Error> {
        message::verify_digest(&self.secp, public_key_hex, digest, signature_hex)
    }

    /// Check that `address` is valid for this coin and network.
    #[must_use]
    pub fn is_valid_address(&self, address: &str) -> bool {
        parse_address(address, self.params).is_ok()
    }

    /// Get the coin.
    #[must_use]
    pub const fn coin(&self) -> Coin {
        self.params.coin
    }

    /// Get the network.
    #[must_use]
    pub const fn network(&self) -> Network {
        self.params.network
    }

    /// Get the chain parameters.
    #[must_use]
    pub const fn params(&self) -> &'static ChainParams {
        self.params
    }

    /// Check whether this deriver holds no private key.
    #[must_use]
    pub const fn is_watch_only(&self) -> bool {
        !self.root.is_private()
    }

    fn root_depth(&self) -> u8 {
        match &self.root {
            ExtendedKey::Private(xprv) => xprv.depth,
            ExtendedKey::Public(xpub) => xpub.depth,
        }
    }

    fn check_public_path(&self, path: &DerivationPath) -> Result<(), Error> {
        if path.has_hardened() {
            return Err(Error::HardenedFromPublic(path.to_string()));
        }
        Ok(())
    }

    fn secret_key(&self, path: &DerivationPath) -> Result<SecretKey, Error> {
        match self.derive_keys(path)? {
            (_, Some(secret_key)) => Ok(secret_key),
            (_, None) => Err(Error::WatchOnly),
        }
    }

    fn derive_keys(&self, path: &DerivationPath) -> Result<(PublicKey, Option<SecretKey>), Error> {
        let bip32_path = to_bip32_path(path);
        match &self.root {
            ExtendedKey::Private(xprv) => {
                let child = xprv.derive_priv(&self.secp, &bip32_path)?;
                let public_key = PublicKey::from_secret_key(&self.secp, &child.private_key);
                Ok((public_key, Some(child.private_key)))
            }
            ExtendedKey::Public(xpub) => {
                self.check_public_path(path)?;
                let child = xpub.derive_pub(&self.secp, &bip32_path)?;
                Ok((child.public_key, None))
            }
        }
    }
}

impl fmt::Debug for Deriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deriver")
            .field("coin", &self.params.coin)
            .field("network", &self.params.network)
            .field("watch_only", &self.is_watch_only())
            .finish_non_exhaustive()
    }
}
