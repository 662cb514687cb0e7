//! Classic XRP Ledger addresses.
//!
//! An account ID is `hash160` of the 33-byte public key. The classic address
//! is its Base58Check encoding with type prefix `0x00`, written in the
//! ripple alphabet, so every address starts with `r`.

use bs58::Alphabet;
use meridian::hash::hash160;

use crate::Error;

const ACCOUNT_ID_PREFIX: u8 = 0x00;

/// Account ID of a compressed public key.
#[must_use]
pub fn account_id(public_key: &[u8; 33]) -> [u8; 20] {
    hash160(public_key)
}

/// Classic address of a compressed public key.
#[must_use]
pub fn public_key_to_address(public_key: &[u8; 33]) -> String {
    encode_account_id(&account_id(public_key))
}

/// Encode a 20-byte account ID.
#[must_use]
pub fn encode_account_id(account_id: &[u8; 20]) -> String {
    bs58::encode(account_id)
        .with_alphabet(Alphabet::RIPPLE)
        .with_check_version(ACCOUNT_ID_PREFIX)
        .into_string()
}

/// Decode a classic address into its account ID.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if the string is not a ripple-alphabet
/// Base58Check account ID.
pub fn decode_address(address: &str) -> Result<[u8; 20], Error> {
    let invalid = || Error::InvalidAddress(address.to_owned());
    let data = bs58::decode(address.trim())
        .with_alphabet(Alphabet::RIPPLE)
        .with_check(Some(ACCOUNT_ID_PREFIX))
        .into_vec()
        .map_err(|_| invalid())?;
    let id = match data.len() {
        // leading type prefix
        21 => &data[1..],
        _ => &data[..],
    };
    <[u8; 20]>::try_from(id).map_err(|_| invalid())
}

/// Check a classic address string.
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    decode_address(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const GENESIS_PUBLIC: [u8; 33] =
        hex!("0330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020");
    const GENESIS_ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    #[test]
    fn test_genesis_account() {
        assert_eq!(public_key_to_address(&GENESIS_PUBLIC), GENESIS_ADDRESS);
        assert_eq!(decode_address(GENESIS_ADDRESS).unwrap(), account_id(&GENESIS_PUBLIC));
    }

    #[test]
    fn test_account_zero() {
        assert_eq!(encode_account_id(&[0u8; 20]), "rrrrrrrrrrrrrrrrrrrrrhoLvTp");
    }

    #[test]
    fn test_validation() {
        assert!(is_valid_address(GENESIS_ADDRESS));
        assert!(!is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTi"));
        assert!(!is_valid_address("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"));
        assert!(!is_valid_address(""));
    }
}
