//! EIP-55 addresses derived from secp256k1 public keys.

use core::str::FromStr;

use alloy_primitives::Address;
use k256::ecdsa::VerifyingKey;

use crate::Error;

/// Ethereum address of a public key: the last 20 bytes of
/// `keccak256(x || y)`.
#[must_use]
pub fn public_key_to_address(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    // skip the 0x04 SEC1 tag
    Address::from_raw_public_key(&encoded.as_bytes()[1..])
}

/// EIP-55 checksummed form with `0x` prefix.
#[must_use]
pub fn to_checksum_address(address: &Address) -> String {
    address.to_checksum(None)
}

/// Parse a hex address, with or without `0x`, in any letter case.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if the string is not 20 bytes of hex.
pub fn parse_address(address: &str) -> Result<Address, Error> {
    Address::from_str(address.trim()).map_err(|_| Error::InvalidAddress(address.to_owned()))
}

/// Check an address string. Mixed-case input must carry a valid EIP-55
/// checksum; all-lowercase or all-uppercase hex is accepted as is.
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    let address = address.trim();
    let body = address.strip_prefix("0x").unwrap_or(address);
    let mixed = body.bytes().any(|b| b.is_ascii_lowercase()) && body.bytes().any(|b| b.is_ascii_uppercase());
    if mixed {
        Address::parse_checksummed(format!("0x{body}"), None).is_ok()
    } else {
        parse_address(address).is_ok()
    }
}
