//! EOS public and private key string formats.
//!
//! Legacy strings use `EOS` + base58(key || ripemd160(key)[..4]) for public
//! keys and Bitcoin-style WIF for private keys. The newer `K1` forms salt the
//! RIPEMD-160 checksum with the curve tag: `PUB_K1_`, `PVT_K1_`, `SIG_K1_`.

use core::fmt;
use core::str::FromStr;

use bitcoin::secp256k1::{self, Secp256k1, SecretKey, Signing};
use meridian::encoding::{base58check_decode, base58check_encode};
use meridian::hash::ripemd160_concat;
use zeroize::Zeroizing;

use crate::Error;

pub(crate) const CHECKSUM_LEN: usize = 4;
const K1_TAG: &[u8] = b"K1";
const LEGACY_PUBLIC_PREFIX: &str = "EOS";
const K1_PUBLIC_PREFIX: &str = "PUB_K1_";
const K1_PRIVATE_PREFIX: &str = "PVT_K1_";
const WIF_VERSION: u8 = 0x80;

/// base58(data || ripemd160(data || K1)[..4]).
pub(crate) fn encode_k1(data: &[u8]) -> String {
    let checksum = ripemd160_concat(&[data, K1_TAG]);
    let mut out = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    out.extend_from_slice(data);
    out.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(out).into_string()
}

/// Inverse of [`encode_k1`], checking the checksum and payload length.
pub(crate) fn decode_k1(encoded: &str, len: usize) -> Option<Vec<u8>> {
    let raw = bs58::decode(encoded).into_vec().ok()?;
    if raw.len() != len + CHECKSUM_LEN {
        return None;
    }
    let (data, checksum) = raw.split_at(len);
    (ripemd160_concat(&[data, K1_TAG])[..CHECKSUM_LEN] == *checksum).then(|| data.to_vec())
}

/// An EOS public key (compressed secp256k1 point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    /// Wrap a secp256k1 public key.
    #[must_use]
    pub const fn new(inner: secp256k1::PublicKey) -> Self {
        Self(inner)
    }

    /// The underlying secp256k1 key.
    #[must_use]
    pub const fn inner(&self) -> &secp256k1::PublicKey {
        &self.0
    }

    /// Legacy `EOS...` form.
    #[must_use]
    pub fn to_legacy_string(&self) -> String {
        let data = self.0.serialize();
        let checksum = ripemd160_concat(&[&data]);
        let mut out = Vec::with_capacity(data.len() + CHECKSUM_LEN);
        out.extend_from_slice(&data);
        out.extend_from_slice(&checksum[..CHECKSUM_LEN]);
        format!("{LEGACY_PUBLIC_PREFIX}{}", bs58::encode(out).into_string())
    }

    /// `PUB_K1_...` form.
    #[must_use]
    pub fn to_k1_string(&self) -> String {
        format!("{K1_PUBLIC_PREFIX}{}", encode_k1(&self.0.serialize()))
    }

    fn parse_legacy(body: &str) -> Option<secp256k1::PublicKey> {
        let raw = bs58::decode(body).into_vec().ok()?;
        if raw.len() != 33 + CHECKSUM_LEN {
            return None;
        }
        let (data, checksum) = raw.split_at(33);
        if ripemd160_concat(&[data])[..CHECKSUM_LEN] != *checksum {
            return None;
        }
        secp256k1::PublicKey::from_slice(data).ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_legacy_string())
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    /// Accepts both the legacy `EOS...` and the `PUB_K1_...` forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if let Some(body) = s.strip_prefix(K1_PUBLIC_PREFIX) {
            decode_k1(body, 33).and_then(|data| secp256k1::PublicKey::from_slice(&data).ok())
        } else if let Some(body) = s.strip_prefix(LEGACY_PUBLIC_PREFIX) {
            Self::parse_legacy(body)
        } else {
            None
        };
        parsed
            .map(Self)
            .ok_or_else(|| Error::InvalidPublicKey(s.to_owned()))
    }
}

/// An EOS private key.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    /// Wrap a secp256k1 secret key.
    #[must_use]
    pub const fn new(inner: SecretKey) -> Self {
        Self(inner)
    }

    /// The underlying secp256k1 key.
    #[must_use]
    pub const fn inner(&self) -> &SecretKey {
        &self.0
    }

    /// Matching public key.
    #[must_use]
    pub fn public_key<C: Signing>(&self, secp: &Secp256k1<C>) -> PublicKey {
        PublicKey(secp256k1::PublicKey::from_secret_key(secp, &self.0))
    }

    /// Legacy WIF: base58check(0x80 || key), without a compression flag.
    #[must_use]
    pub fn to_wif(&self) -> Zeroizing<String> {
        let secret = Zeroizing::new(self.0.secret_bytes());
        Zeroizing::new(base58check_encode(&[WIF_VERSION], &secret[..]))
    }

    /// `PVT_K1_...` form.
    #[must_use]
    pub fn to_k1_string(&self) -> Zeroizing<String> {
        let secret = Zeroizing::new(self.0.secret_bytes());
        Zeroizing::new(format!("{K1_PRIVATE_PREFIX}{}", encode_k1(&secret[..])))
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    /// Accepts a legacy WIF or a `PVT_K1_...` key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let secret = if let Some(body) = s.strip_prefix(K1_PRIVATE_PREFIX) {
            decode_k1(body, 32).ok_or(Error::InvalidPrivateKey)?
        } else {
            let (version, payload) =
                base58check_decode(s, 1).map_err(|_| Error::InvalidPrivateKey)?;
            if version[0] != WIF_VERSION || payload.len() != 32 {
                return Err(Error::InvalidPrivateKey);
            }
            payload
        };
        let secret = Zeroizing::new(secret);
        SecretKey::from_slice(&secret)
            .map(Self)
            .map_err(|_| Error::InvalidPrivateKey)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}
