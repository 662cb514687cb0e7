use meridian::DerivationPath;
use meridian_btc::{AddressType, Coin, Deriver, Network};
use tracing::debug;
use zeroize::Zeroizing;

use crate::source::Root;
use crate::{Blockchain, DerivedKey, KeySource, Keychain, Result};

/// Keychain over a Bitcoin-family [`Deriver`] with a fixed address type.
#[derive(Debug)]
pub struct BitcoinKeychain {
    deriver: Deriver,
    address_type: AddressType,
}

impl BitcoinKeychain {
    /// Open a keychain rendering `address_type` addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the coin cannot encode `address_type` or the
    /// source does not decode.
    pub fn open(coin: Coin, network: Network, source: &KeySource, address_type: AddressType) -> Result<Self> {
        if !coin.params(network).supports(address_type) {
            return Err(meridian_btc::Error::UnsupportedAddressType { coin, address_type }.into());
        }
        let deriver = match source.root()? {
            Root::Seed(wallet) => Deriver::new(&wallet, coin, network)?,
            Root::Xprv(xprv) => Deriver::from_xprv(xprv, coin, network)?,
            Root::Xpub(xpub) => Deriver::from_xpub(xpub, coin, network)?,
        };
        Ok(Self { deriver, address_type })
    }

    /// Address type rendered by this keychain.
    #[must_use]
    pub const fn address_type(&self) -> AddressType {
        self.address_type
    }

    /// Account-level extended public key for this address type.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    pub fn account_xpub(&self, account: u32) -> Result<String> {
        Ok(self.deriver.account_xpub(self.address_type, account)?)
    }
}

impl Keychain for BitcoinKeychain {
    fn blockchain(&self) -> Blockchain {
        self.deriver.coin().into()
    }

    fn network(&self) -> Network {
        self.deriver.network()
    }

    fn is_watch_only(&self) -> bool {
        self.deriver.is_watch_only()
    }

    fn default_path(&self, account: u32, change: bool, index: u32) -> Result<DerivationPath> {
        Ok(self.deriver.default_path(self.address_type, account, change, index)?)
    }

    fn derive(&self, path: &DerivationPath) -> Result<DerivedKey> {
        debug!(chain = %self.blockchain(), %path, address_type = %self.address_type, "derive");
        let derived = self.deriver.derive_at_path(path, self.address_type)?;
        Ok(DerivedKey {
            path: derived.path,
            address: derived.address,
            public_key: derived.public_key_hex,
            private_key: derived.private_key_wif,
        })
    }

    fn extended_public_key(&self, path: &DerivationPath) -> Result<String> {
        Ok(self.deriver.extended_public_key(path)?)
    }

    fn extended_private_key(&self, path: &DerivationPath) -> Result<Zeroizing<String>> {
        Ok(self.deriver.extended_private_key(path)?)
    }

    fn sign_message(&self, path: &DerivationPath, message: &[u8]) -> Result<String> {
        debug!(chain = %self.blockchain(), %path, "sign message");
        Ok(self.deriver.sign_message(path, message)?)
    }

    fn verify_message(&self, public: &str, message: &[u8], signature: &str) -> Result<bool> {
        Ok(self.deriver.verify_message(public, message, signature)?)
    }

    fn sign_digest(&self, path: &DerivationPath, digest: &[u8; 32]) -> Result<String> {
        debug!(chain = %self.blockchain(), %path, "sign digest");
        Ok(self.deriver.sign_digest(path, digest)?)
    }

    fn verify_digest(&self, public: &str, digest: &[u8; 32], signature: &str) -> Result<bool> {
        Ok(self.deriver.verify_digest(public, digest, signature)?)
    }

    fn is_valid_address(&self, address: &str) -> bool {
        self.deriver.is_valid_address(address)
    }
}
