//! Single-key (non-HD) Ethereum wallet.

use alloy_primitives::Address;
use k256::ecdsa::SigningKey;
use meridian::encoding::decode_hex_array;
use zeroize::Zeroizing;

use crate::address::{public_key_to_address, to_checksum_address};
use crate::{eip191, Error};

/// A wallet holding one private key, without mnemonic or HD derivation.
pub struct StandardWallet {
    private_key: SigningKey,
    address: Address,
}

impl StandardWallet {
    /// Generate a wallet with a random private key.
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::rngs::OsRng))
    }

    /// Import a hex private key, with or without `0x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex is malformed or not a valid scalar.
    pub fn from_private_key_hex(hex_str: &str) -> Result<Self, Error> {
        let bytes = Zeroizing::new(decode_hex_array::<32>(hex_str)?);
        let private_key = SigningKey::from_slice(&bytes[..]).map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self::from_signing_key(private_key))
    }

    fn from_signing_key(private_key: SigningKey) -> Self {
        let address = public_key_to_address(private_key.verifying_key());
        Self {
            private_key,
            address,
        }
    }

    /// Private key in hex without `0x`.
    #[must_use]
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.private_key.to_bytes()))
    }

    /// Uncompressed public key in hex without `0x`.
    #[must_use]
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.private_key.verifying_key().to_encoded_point(false).as_bytes())
    }

    /// Get the address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Checksummed address string.
    #[must_use]
    pub fn address_string(&self) -> String {
        to_checksum_address(&self.address)
    }

    /// EIP-191 personal-message signature.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn sign_message(&self, message: &[u8]) -> Result<String, Error> {
        eip191::sign_message(&self.private_key, message)
    }
}

impl core::fmt::Debug for StandardWallet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StandardWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_known_key() {
        let wallet = StandardWallet::from_private_key_hex(KEY).unwrap();
        assert_eq!(wallet.address_string(), "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23");
        assert_eq!(wallet.private_key_hex().as_str(), KEY);
        assert!(wallet.public_key_hex().starts_with("04"));
    }

    #[test]
    fn test_prefix_and_errors() {
        let prefixed = StandardWallet::from_private_key_hex(&format!("0x{KEY}")).unwrap();
        assert_eq!(prefixed.address_string(), "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23");
        assert!(StandardWallet::from_private_key_hex("zz").is_err());
        assert!(StandardWallet::from_private_key_hex(&"00".repeat(32)).is_err());
    }

    #[test]
    fn test_sign_message_verifies() {
        let wallet = StandardWallet::from_private_key_hex(KEY).unwrap();
        let sig = wallet.sign_message(b"Some data").unwrap();
        assert!(eip191::verify_message(&wallet.address_string(), b"Some data", &sig).unwrap());
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_generate_roundtrip() {
        let wallet = StandardWallet::generate();
        let imported = StandardWallet::from_private_key_hex(&wallet.private_key_hex()).unwrap();
        assert_eq!(wallet.address_string(), imported.address_string());
    }
}
