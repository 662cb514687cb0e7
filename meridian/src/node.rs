//! BIP-32 extended keys over `k256`, shared by the account-model chains.
//!
//! A [`Node`] is either a private key (seed master or imported `xprv`) or a
//! watch-only `xpub`. Paths are applied relative to the node; hardened steps
//! below a public node are refused.

use core::str::FromStr;

use bip32::{ChildNumber, Prefix, XPrv, XPub};
use k256::ecdsa::{SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::{DerivationPath, Wallet};

/// Errors from extended key import and derivation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NodeError {
    /// Child derivation or master key generation failed.
    #[error("BIP32 derivation error: {0}")]
    Bip32(#[from] bip32::Error),

    /// Extended key does not parse or has the wrong prefix.
    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),

    /// A hardened step was requested below a public node.
    #[error("cannot derive hardened path {0} from an extended public key")]
    HardenedFromPublic(String),
}

/// A private or watch-only BIP-32 node.
#[derive(Clone)]
pub enum Node {
    /// Extended private key.
    Private(XPrv),
    /// Extended public key.
    Public(XPub),
}

impl Node {
    /// Master node of the wallet's seed.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::Bip32`] if the seed yields an invalid key.
    pub fn master(wallet: &Wallet) -> Result<Self, NodeError> {
        Ok(Self::Private(XPrv::new(wallet.seed())?))
    }

    /// Import a mainnet `xprv`.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidExtendedKey`] for anything else.
    pub fn from_xprv(xprv: &str) -> Result<Self, NodeError> {
        let xprv = xprv.trim();
        if !xprv.starts_with(Prefix::XPRV.as_str()) {
            return Err(NodeError::InvalidExtendedKey("expected an xprv key".to_owned()));
        }
        XPrv::from_str(xprv)
            .map(Self::Private)
            .map_err(|e| NodeError::InvalidExtendedKey(e.to_string()))
    }

    /// Import a mainnet `xpub`.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidExtendedKey`] for anything else.
    pub fn from_xpub(xpub: &str) -> Result<Self, NodeError> {
        let xpub = xpub.trim();
        if !xpub.starts_with(Prefix::XPUB.as_str()) {
            return Err(NodeError::InvalidExtendedKey("expected an xpub key".to_owned()));
        }
        XPub::from_str(xpub)
            .map(Self::Public)
            .map_err(|e| NodeError::InvalidExtendedKey(e.to_string()))
    }

    /// Depth below the master key; non-zero for imported account keys.
    #[must_use]
    pub fn depth(&self) -> u8 {
        match self {
            Self::Private(xprv) => xprv.attrs().depth,
            Self::Public(xpub) => xpub.attrs().depth,
        }
    }

    /// Whether this node holds no private key.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public(_))
    }

    /// Node at `path` relative to this one.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::HardenedFromPublic`] for hardened steps below a
    /// public node.
    pub fn derive(&self, path: &DerivationPath) -> Result<Self, NodeError> {
        let mut steps = path.to_u32_vec().into_iter().map(ChildNumber);
        Ok(match self {
            Self::Private(root) => Self::Private(
                steps.try_fold(root.clone(), |node, step| node.derive_child(step))?,
            ),
            Self::Public(root) => {
                if path.has_hardened() {
                    return Err(NodeError::HardenedFromPublic(path.to_string()));
                }
                Self::Public(steps.try_fold(root.clone(), |node, step| node.derive_child(step))?)
            }
        })
    }

    /// Public key of this node.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        match self {
            Self::Private(xprv) => *xprv.private_key().verifying_key(),
            Self::Public(xpub) => *xpub.public_key(),
        }
    }

    /// Private key of this node, `None` when watch-only.
    #[must_use]
    pub fn signing_key(&self) -> Option<&SigningKey> {
        match self {
            Self::Private(xprv) => Some(xprv.private_key()),
            Self::Public(_) => None,
        }
    }

    /// `xprv` encoding, `None` when watch-only.
    #[must_use]
    pub fn to_xprv(&self) -> Option<Zeroizing<String>> {
        match self {
            Self::Private(xprv) => Some(xprv.to_string(Prefix::XPRV)),
            Self::Public(_) => None,
        }
    }

    /// `xpub` encoding.
    #[must_use]
    pub fn to_xpub(&self) -> String {
        match self {
            Self::Private(xprv) => xprv.public_key().to_string(Prefix::XPUB),
            Self::Public(xpub) => xpub.to_string(Prefix::XPUB),
        }
    }
}

impl core::fmt::Debug for Node {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Node")
            .field("public", &self.is_public())
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const ROOT_XPRV: &str = "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu";

    fn master() -> Node {
        Node::master(&Wallet::from_mnemonic(TEST_MNEMONIC, None).unwrap()).unwrap()
    }

    #[test]
    fn master_matches_bip32_root() {
        let node = master();
        assert_eq!(node.depth(), 0);
        assert_eq!(node.to_xprv().unwrap().as_str(), ROOT_XPRV);
        assert_eq!(Node::from_xprv(ROOT_XPRV).unwrap().to_xpub(), node.to_xpub());
    }

    #[test]
    fn public_branch_follows_private_branch() {
        let account: DerivationPath = "m/44'/60'/0'".parse().unwrap();
        let tail: DerivationPath = "m/0/7".parse().unwrap();
        let full: DerivationPath = "m/44'/60'/0'/0/7".parse().unwrap();

        let private = master().derive(&full).unwrap();
        let xpub = master().derive(&account).unwrap().to_xpub();
        let watch = Node::from_xpub(&xpub).unwrap();
        assert_eq!(watch.depth(), 3);

        let public = watch.derive(&tail).unwrap();
        assert!(public.is_public());
        assert!(public.signing_key().is_none());
        assert!(public.to_xprv().is_none());
        assert_eq!(public.verifying_key(), private.verifying_key());
    }

    #[test]
    fn hardened_below_public_refused() {
        let watch = Node::from_xpub(&master().to_xpub()).unwrap();
        let path: DerivationPath = "m/44'".parse().unwrap();
        assert!(matches!(watch.derive(&path), Err(NodeError::HardenedFromPublic(_))));
    }

    #[test]
    fn wrong_prefix_rejected() {
        let xpub = master().to_xpub();
        assert!(matches!(Node::from_xprv(&xpub), Err(NodeError::InvalidExtendedKey(_))));
        assert!(matches!(Node::from_xpub(ROOT_XPRV), Err(NodeError::InvalidExtendedKey(_))));
        assert!(Node::from_xpub("xpub123").is_err());
    }
}
