//! DER ECDSA signatures over SHA-512Half digests.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use meridian::encoding::decode_hex;
use meridian::hash::sha512_half;

use crate::Error;

/// Sign a 32-byte digest; the result is low-S, DER encoded, in hex.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] if signing fails.
pub fn sign_digest(key: &SigningKey, digest: &[u8; 32]) -> Result<String, Error> {
    let signature: Signature = key.sign_prehash(digest).map_err(|_| Error::InvalidSignature)?;
    let signature = signature.normalize_s().unwrap_or(signature);
    Ok(hex::encode(signature.to_der().as_bytes()))
}

/// Sign `sha512_half(data)`.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] if signing fails.
pub fn sign_message(key: &SigningKey, data: &[u8]) -> Result<String, Error> {
    sign_digest(key, &sha512_half(data))
}

/// Verify a DER hex signature over a digest against a hex SEC1 public key.
///
/// # Errors
///
/// Returns an error if the key or signature does not decode.
pub fn verify_digest(public_key_hex: &str, digest: &[u8; 32], signature_hex: &str) -> Result<bool, Error> {
    let key_bytes = decode_hex(public_key_hex).map_err(|_| Error::InvalidPublicKey)?;
    let key = VerifyingKey::from_sec1_bytes(&key_bytes).map_err(|_| Error::InvalidPublicKey)?;
    let der = decode_hex(signature_hex).map_err(|_| Error::InvalidSignature)?;
    let signature = Signature::from_der(&der).map_err(|_| Error::InvalidSignature)?;
    Ok(key.verify_prehash(digest, &signature).is_ok())
}

/// Verify a signature over `sha512_half(data)`.
///
/// # Errors
///
/// Returns an error if the key or signature does not decode.
pub fn verify_message(public_key_hex: &str, data: &[u8], signature_hex: &str) -> Result<bool, Error> {
    verify_digest(public_key_hex, &sha512_half(data), signature_hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SigningKey {
        SigningKey::from_slice(&[0x2a; 32]).unwrap()
    }

    fn public_hex(key: &SigningKey) -> String {
        hex::encode(key.verifying_key().to_encoded_point(true).as_bytes())
    }

    #[test]
    fn test_message_roundtrip() {
        let key = key();
        let sig = sign_message(&key, b"payment").unwrap();
        assert!(sig.starts_with("30"));
        assert!(verify_message(&public_hex(&key), b"payment", &sig).unwrap());
        assert!(!verify_message(&public_hex(&key), b"payments", &sig).unwrap());
    }

    #[test]
    fn test_low_s() {
        let key = key();
        for i in 0u8..8 {
            let der = hex::decode(sign_digest(&key, &[i; 32]).unwrap()).unwrap();
            let sig = Signature::from_der(&der).unwrap();
            assert!(sig.normalize_s().is_none());
        }
    }

    #[test]
    fn test_malformed_inputs() {
        let key = key();
        let sig = sign_message(&key, b"x").unwrap();
        assert!(verify_message("02ff", b"x", &sig).is_err());
        assert!(verify_message(&public_hex(&key), b"x", "3000").is_err());
        assert!(verify_message(&public_hex(&key), b"x", "zz").is_err());
    }
}
