//! Recoverable secp256k1 signatures and EIP-191 personal messages.
//!
//! Signatures are 65 bytes, `r || s || v`. Personal-message signatures carry
//! `v = 27 + recid` as `personal_sign` does; digest signatures carry the raw
//! recovery id.

use alloy_primitives::{eip191_hash_message, Address};
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use meridian::encoding::decode_hex;

use crate::address::{parse_address, public_key_to_address};
use crate::Error;

const SIGNATURE_LEN: usize = 65;
const LEGACY_V_OFFSET: u8 = 27;

/// Keccak-256 of `"\x19Ethereum Signed Message:\n" || len || message`.
#[must_use]
pub fn hash_message(message: &[u8]) -> [u8; 32] {
    eip191_hash_message(message).0
}

/// Sign a 32-byte prehash, returning `r || s || recid`. `s` is always low.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] if signing fails.
pub fn sign_prehash(key: &SigningKey, digest: &[u8; 32]) -> Result<[u8; SIGNATURE_LEN], Error> {
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(digest)
        .map_err(|_| Error::InvalidSignature)?;
    let mut out = [0u8; SIGNATURE_LEN];
    out[..64].copy_from_slice(&signature.to_bytes());
    out[64] = recovery_id.to_byte();
    Ok(out)
}

fn split_signature(bytes: &[u8]) -> Result<(Signature, RecoveryId), Error> {
    if bytes.len() != SIGNATURE_LEN {
        return Err(Error::InvalidSignature);
    }
    let v = match bytes[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - LEGACY_V_OFFSET,
        _ => return Err(Error::InvalidSignature),
    };
    let signature = Signature::from_slice(&bytes[..64]).map_err(|_| Error::InvalidSignature)?;
    let recovery_id = RecoveryId::from_byte(v).ok_or(Error::InvalidSignature)?;
    Ok((signature, recovery_id))
}

/// Recover the signer's public key from a 65-byte signature.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] if the signature is malformed or no
/// key recovers from it.
pub fn recover(digest: &[u8; 32], signature: &[u8]) -> Result<VerifyingKey, Error> {
    let (signature, recovery_id) = split_signature(signature)?;
    VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
        .map_err(|_| Error::InvalidSignature)
}

/// EIP-191 personal-message signature as `0x` hex with `v` in {27, 28}.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] if signing fails.
pub fn sign_message(key: &SigningKey, message: &[u8]) -> Result<String, Error> {
    let mut signature = sign_prehash(key, &hash_message(message))?;
    signature[64] += LEGACY_V_OFFSET;
    Ok(format!("0x{}", hex::encode(signature)))
}

/// Check that `signature_hex` over `message` was made by `address`.
///
/// Accepts `v` in {0, 1, 27, 28}. Address comparison ignores letter case.
///
/// # Errors
///
/// Returns an error if the address or signature is malformed.
pub fn verify_message(address: &str, message: &[u8], signature_hex: &str) -> Result<bool, Error> {
    let expected = parse_address(address)?;
    let signature = decode_hex(signature_hex).map_err(|_| Error::InvalidSignature)?;
    let recovered = recover(&hash_message(message), &signature)?;
    Ok(public_key_to_address(&recovered) == expected)
}

/// Recover the signer address of a personal-message signature.
///
/// # Errors
///
/// Returns an error if the signature is malformed.
pub fn recover_address(message: &[u8], signature_hex: &str) -> Result<Address, Error> {
    let signature = decode_hex(signature_hex).map_err(|_| Error::InvalidSignature)?;
    Ok(public_key_to_address(&recover(&hash_message(message), &signature)?))
}

/// Check a digest signature (64-byte `r || s`, or 65 bytes with any `v`)
/// against a SEC1 public key in hex.
///
/// # Errors
///
/// Returns an error if the key or signature cannot be decoded.
pub fn verify_digest(public_key_hex: &str, digest: &[u8; 32], signature_hex: &str) -> Result<bool, Error> {
    let key_bytes = decode_hex(public_key_hex)?;
    let key = VerifyingKey::from_sec1_bytes(&key_bytes).map_err(|_| Error::InvalidPublicKey)?;

    let bytes = decode_hex(signature_hex).map_err(|_| Error::InvalidSignature)?;
    let rs = match bytes.len() {
        64 | SIGNATURE_LEN => &bytes[..64],
        _ => return Err(Error::InvalidSignature),
    };
    let signature = Signature::from_slice(rs).map_err(|_| Error::InvalidSignature)?;
    Ok(key.verify_prehash(digest, &signature).is_ok())
}
