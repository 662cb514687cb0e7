//! Chain-aware BIP-32 extended key serialisation.
//!
//! The bitcoin crate only knows Bitcoin's `xprv`/`tprv` version bytes. Other
//! coins reuse the same 78-byte layout with their own versions, so keys are
//! re-framed here: the version is swapped on the way in and out and the body
//! is handed to [`Xpriv::decode`] / [`Xpub::decode`].

use bitcoin::bip32::{Xpriv, Xpub};
use bitcoin::secp256k1::{Secp256k1, Signing};
use meridian::encoding::{base58check_decode, base58check_encode};
use zeroize::Zeroizing;

use crate::{ChainParams, Error};

const VERSION_LEN: usize = 4;
const SERIALIZED_LEN: usize = 78;

/// A BIP-32 extended key, private or public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedKey {
    /// Extended private key.
    Private(Xpriv),
    /// Extended public key (watch-only).
    Public(Xpub),
}

impl ExtendedKey {
    /// Parse an extended key carrying this chain's version bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtendedKey`] if the string is not Base58Check,
    /// has the wrong length, or its version belongs to another chain.
    pub fn decode(encoded: &str, params: &ChainParams) -> Result<Self, Error> {
        let (version, body) = base58check_decode(encoded.trim(), VERSION_LEN)
            .map_err(|e| Error::InvalidExtendedKey(e.to_string()))?;
        if body.len() != SERIALIZED_LEN - VERSION_LEN {
            return Err(Error::InvalidExtendedKey(format!(
                "expected {SERIALIZED_LEN} bytes, got {}",
                body.len() + VERSION_LEN
            )));
        }

        let reframe = |btc_version: [u8; 4]| {
            let mut data = Zeroizing::new([0u8; SERIALIZED_LEN]);
            data[..VERSION_LEN].copy_from_slice(&btc_version);
            data[VERSION_LEN..].copy_from_slice(&body);
            data
        };

        if version == params.xprv_version {
            let data = reframe(params.bitcoin_xprv_version());
            Ok(Self::Private(Xpriv::decode(&data[..])?))
        } else if version == params.xpub_version {
            let data = reframe(params.bitcoin_xpub_version());
            Ok(Self::Public(Xpub::decode(&data[..])?))
        } else {
            Err(Error::InvalidExtendedKey(format!(
                "version {} is not a {} {} key",
                hex::encode(&version),
                params.coin,
                params.network
            )))
        }
    }

    /// Serialise with this chain's version bytes.
    #[must_use]
    pub fn encode(&self, params: &ChainParams) -> Zeroizing<String> {
        match self {
            Self::Private(xprv) => encode_xprv(xprv, params),
            Self::Public(xpub) => Zeroizing::new(encode_xpub(xpub, params)),
        }
    }

    /// Check whether this key holds private material.
    #[inline]
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }

    /// The public half of this key.
    #[must_use]
    pub fn to_public<C: Signing>(&self, secp: &Secp256k1<C>) -> Xpub {
        match self {
            Self::Private(xprv) => Xpub::from_priv(secp, xprv),
            Self::Public(xpub) => *xpub,
        }
    }
}

/// Serialise an extended private key with this chain's version bytes.
#[must_use]
pub fn encode_xprv(xprv: &Xpriv, params: &ChainParams) -> Zeroizing<String> {
    let data = Zeroizing::new(xprv.encode());
    Zeroizing::new(base58check_encode(
        &params.xprv_version,
        &data[VERSION_LEN..],
    ))
}

/// Serialise an extended public key with this chain's version bytes.
#[must_use]
pub fn encode_xpub(xpub: &Xpub, params: &ChainParams) -> String {
    let data = xpub.encode();
    base58check_encode(&params.xpub_version, &data[VERSION_LEN..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coin, Network};
    use bitcoin::NetworkKind;
    use hex_literal::hex;

    const SEED: [u8; 64] = hex!(
        "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1"
        "9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
    );
    const ROOT_XPRV: &str = "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu";

    #[test]
    fn test_bitcoin_root_matches_upstream_encoding() {
        let params = Coin::Bitcoin.params(Network::Mainnet);
        let root = Xpriv::new_master(NetworkKind::Main, &SEED).unwrap();
        assert_eq!(encode_xprv(&root, params).as_str(), ROOT_XPRV);
        assert_eq!(root.to_string(), ROOT_XPRV);

        let decoded = ExtendedKey::decode(ROOT_XPRV, params).unwrap();
        assert_eq!(decoded, ExtendedKey::Private(root));
    }

    #[test]
    fn test_litecoin_versions() {
        let params = Coin::Litecoin.params(Network::Mainnet);
        let root = Xpriv::new_master(NetworkKind::Main, &SEED).unwrap();
        let ltpv = encode_xprv(&root, params);
        assert!(ltpv.starts_with("Ltpv"), "{}", ltpv.as_str());

        let secp = Secp256k1::new();
        let ltub = encode_xpub(&Xpub::from_priv(&secp, &root), params);
        assert!(ltub.starts_with("Ltub"), "{ltub}");

        assert_eq!(ExtendedKey::decode(&ltpv, params).unwrap(), ExtendedKey::Private(root));
        assert!(!ExtendedKey::decode(&ltub, params).unwrap().is_private());
    }

    #[test]
    fn test_dogecoin_versions() {
        let params = Coin::Dogecoin.params(Network::Mainnet);
        let root = Xpriv::new_master(NetworkKind::Main, &SEED).unwrap();
        assert!(encode_xprv(&root, params).starts_with("dgpv"));
        let secp = Secp256k1::new();
        assert!(encode_xpub(&Xpub::from_priv(&secp, &root), params).starts_with("dgub"));
    }

    #[test]
    fn test_foreign_version_rejected() {
        let ltc = Coin::Litecoin.params(Network::Mainnet);
        assert!(matches!(
            ExtendedKey::decode(ROOT_XPRV, ltc),
            Err(Error::InvalidExtendedKey(_))
        ));
        let btc_test = Coin::Bitcoin.params(Network::Testnet);
        assert!(ExtendedKey::decode(ROOT_XPRV, btc_test).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let btc = Coin::Bitcoin.params(Network::Mainnet);
        assert!(ExtendedKey::decode("xprv", btc).is_err());
        assert!(ExtendedKey::decode("not base58 0OIl", btc).is_err());
    }
}
