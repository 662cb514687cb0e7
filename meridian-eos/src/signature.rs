//! Canonical recoverable `SIG_K1_` signatures.

use core::fmt;
use core::str::FromStr;

use bitcoin::secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use bitcoin::secp256k1::{Message, Secp256k1, Signing, Verification};

use meridian::hash::sha256;

use crate::keys::{decode_k1, encode_k1, PrivateKey, PublicKey};
use crate::Error;

const K1_SIGNATURE_PREFIX: &str = "SIG_K1_";
const SIGNATURE_LEN: usize = 65;
const HEADER_BASE: u8 = 27 + 4;
const MAX_NONCE_ATTEMPTS: u32 = 64;

/// A compact recoverable signature: header byte, then `r || s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    recovery_id: u8,
    compact: [u8; 64],
}

/// The node only accepts signatures whose `r` and `s` each encode as exactly
/// 32 DER bytes: no high bit set and no redundant leading zero.
#[must_use]
pub fn is_canonical(compact: &[u8; 64]) -> bool {
    let half_ok = |h: &[u8]| h[0] & 0x80 == 0 && !(h[0] == 0 && h[1] & 0x80 == 0);
    half_ok(&compact[..32]) && half_ok(&compact[32..])
}

/// Verify a `SIG_K1_` signature over a digest against a legacy or K1
/// public key string.
///
/// # Errors
///
/// Returns an error if the key or signature string is malformed.
pub fn verify_digest<C: Verification>(
    secp: &Secp256k1<C>,
    public_key: &str,
    digest: &[u8; 32],
    signature: &str,
) -> Result<bool, Error> {
    let expected = PublicKey::from_str(public_key)?;
    let signature = Signature::from_str(signature)?;
    Ok(signature.recover(secp, digest)? == expected)
}

/// Verify a `SIG_K1_` signature over `sha256(data)`.
///
/// # Errors
///
/// Returns an error if the key or signature string is malformed.
pub fn verify_message<C: Verification>(
    secp: &Secp256k1<C>,
    public_key: &str,
    data: &[u8],
    signature: &str,
) -> Result<bool, Error> {
    verify_digest(secp, public_key, &sha256(data), signature)
}

impl Signature {
    /// Sign a 32-byte digest, retrying with fresh nonce data until the result
    /// is canonical.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SigningFailed`] if no canonical signature is found.
    pub fn sign<C: Signing + Verification>(
        secp: &Secp256k1<C>,
        key: &PrivateKey,
        digest: &[u8; 32],
    ) -> Result<Self, Error> {
        let message = Message::from_digest(*digest);
        let public_key = key.public_key(secp);

        for attempt in 0..MAX_NONCE_ATTEMPTS {
            let signature = if attempt == 0 {
                secp.sign_ecdsa(&message, key.inner())
            } else {
                let mut extra = [0u8; 32];
                extra[28..].copy_from_slice(&attempt.to_be_bytes());
                secp.sign_ecdsa_with_noncedata(&message, key.inner(), &extra)
            };
            let compact = signature.serialize_compact();
            if !is_canonical(&compact) {
                continue;
            }

            for recovery_id in 0u8..4 {
                let candidate = Self {
                    recovery_id,
                    compact,
                };
                if candidate.recover(secp, digest).ok() == Some(public_key) {
                    return Ok(candidate);
                }
            }
        }
        Err(Error::SigningFailed)
    }

    /// Recover the signing public key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSignature`] if no key recovers.
    pub fn recover<C: Verification>(
        &self,
        secp: &Secp256k1<C>,
        digest: &[u8; 32],
    ) -> Result<PublicKey, Error> {
        let invalid = || Error::InvalidSignature("unrecoverable".to_owned());
        let recovery_id = RecoveryId::from_i32(i32::from(self.recovery_id)).map_err(|_| invalid())?;
        let signature =
            RecoverableSignature::from_compact(&self.compact, recovery_id).map_err(|_| invalid())?;
        secp.recover_ecdsa(&Message::from_digest(*digest), &signature)
            .map(PublicKey::new)
            .map_err(|_| invalid())
    }

    /// The 65-byte wire form: `27 + 4 + recid || r || s`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[0] = HEADER_BASE + self.recovery_id;
        out[1..].copy_from_slice(&self.compact);
        out
    }

    /// Check the canonical form.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        is_canonical(&self.compact)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{K1_SIGNATURE_PREFIX}{}", encode_k1(&self.to_bytes()))
    }
}

impl FromStr for Signature {
    type Err = Error;

    /// Parse a `SIG_K1_` string. Non-canonical signatures are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidSignature(reason.to_owned());
        let body = s
            .trim()
            .strip_prefix(K1_SIGNATURE_PREFIX)
            .ok_or_else(|| invalid("expected SIG_K1_ prefix"))?;
        let bytes = decode_k1(body, SIGNATURE_LEN).ok_or_else(|| invalid("bad checksum"))?;

        let recovery_id = bytes[0]
            .checked_sub(HEADER_BASE)
            .filter(|id| *id < 4)
            .ok_or_else(|| invalid("bad header byte"))?;
        let mut compact = [0u8; 64];
        compact.copy_from_slice(&bytes[1..]);

        let signature = Self {
            recovery_id,
            compact,
        };
        if !signature.is_canonical() {
            return Err(invalid("not canonical"));
        }
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian::hash::sha256;

    fn dev_key() -> PrivateKey {
        "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3".parse().unwrap()
    }

    #[test]
    fn test_canonical_rule() {
        let mut c = [0x11u8; 64];
        assert!(is_canonical(&c));
        c[0] = 0x80;
        assert!(!is_canonical(&c));
        c[0] = 0x00;
        assert!(!is_canonical(&c));
        c[1] = 0x80;
        assert!(is_canonical(&c));
        c[32] = 0x90;
        assert!(!is_canonical(&c));
    }

    #[test]
    fn test_sign_recover_roundtrip() {
        let secp = Secp256k1::new();
        let key = dev_key();
        for i in 0u8..16 {
            let digest = sha256(&[i]);
            let signature = Signature::sign(&secp, &key, &digest).unwrap();
            assert!(signature.is_canonical());

            let text = signature.to_string();
            assert!(text.starts_with("SIG_K1_"));
            let parsed: Signature = text.parse().unwrap();
            assert_eq!(parsed, signature);
            assert_eq!(parsed.recover(&secp, &digest).unwrap(), key.public_key(&secp));
        }
    }

    #[test]
    fn test_signing_is_deterministic() {
        let secp = Secp256k1::new();
        let digest = sha256(b"eos");
        let a = Signature::sign(&secp, &dev_key(), &digest).unwrap();
        let b = Signature::sign(&secp, &dev_key(), &digest).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("SIG_R1_abc".parse::<Signature>().is_err());
        assert!("SIG_K1_".parse::<Signature>().is_err());
        assert!("SIG_K1_111111".parse::<Signature>().is_err());

        let non_canonical = Signature {
            recovery_id: 0,
            compact: [0x80; 64],
        };
        assert!(non_canonical.to_string().parse::<Signature>().is_err());
    }
}
