use meridian::DerivationPath;
use meridian_eos::Deriver;
use tracing::debug;
use zeroize::Zeroizing;

use super::check_network;
use crate::source::Root;
use crate::{Blockchain, DerivedKey, KeySource, Keychain, Network, Result};

/// EOS keychain over [`Deriver`]. Public keys double as addresses.
#[derive(Debug)]
pub struct EosKeychain {
    deriver: Deriver,
}

impl EosKeychain {
    /// Open a keychain. Only [`Network::Mainnet`] is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error for other networks or a source that does not decode.
    pub fn open(network: Network, source: &KeySource) -> Result<Self> {
        check_network(Blockchain::Eos, network)?;
        let deriver = match source.root()? {
            Root::Seed(wallet) => Deriver::new(&wallet)?,
            Root::Xprv(xprv) => Deriver::from_xprv(xprv)?,
            Root::Xpub(xpub) => Deriver::from_xpub(xpub)?,
        };
        Ok(Self { deriver })
    }
}

impl Keychain for EosKeychain {
    fn blockchain(&self) -> Blockchain {
        Blockchain::Eos
    }

    fn network(&self) -> Network {
        Network::Mainnet
    }

    fn is_watch_only(&self) -> bool {
        self.deriver.is_watch_only()
    }

    fn default_path(&self, account: u32, change: bool, index: u32) -> Result<DerivationPath> {
        Ok(self.deriver.default_path(account, change, index)?)
    }

    fn derive(&self, path: &DerivationPath) -> Result<DerivedKey> {
        debug!(chain = %Blockchain::Eos, %path, "derive");
        let derived = self.deriver.derive_at_path(path)?;
        Ok(DerivedKey {
            path: derived.path,
            address: derived.public_key,
            public_key: derived.public_key_k1,
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
        debug!(chain = %Blockchain::Eos, %path, "sign message");
        Ok(self.deriver.sign_message(path, message)?)
    }

    fn verify_message(&self, public: &str, message: &[u8], signature: &str) -> Result<bool> {
        Ok(self.deriver.verify_message(public, message, signature)?)
    }

    fn sign_digest(&self, path: &DerivationPath, digest: &[u8; 32]) -> Result<String> {
        debug!(chain = %Blockchain::Eos, %path, "sign digest");
        Ok(self.deriver.sign_digest(path, digest)?)
    }

    fn verify_digest(&self, public: &str, digest: &[u8; 32], signature: &str) -> Result<bool> {
        Ok(self.deriver.verify_digest(public, digest, signature)?)
    }

    fn is_valid_address(&self, address: &str) -> bool {
        address.parse::<meridian_eos::PublicKey>().is_ok()
    }
}
