//! Single-key (non-HD) Bitcoin-family wallet.

use bitcoin::secp256k1::{PublicKey, Secp256k1, SecretKey};
use meridian::encoding::decode_hex_array;
use zeroize::Zeroizing;

use crate::address::encode_address_with;
use crate::wif::{decode_wif, encode_wif};
use crate::{AddressType, ChainParams, Coin, Error, Network};

/// A wallet holding one private key, without mnemonic or HD derivation.
///
/// # Example
///
/// ```
/// use meridian_btc::{AddressType, Coin, StandardWallet};
///
/// let wallet = StandardWallet::from_wif(
///     "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn",
///     Coin::Bitcoin,
///     AddressType::P2pkh,
/// )?;
/// assert_eq!(wallet.address_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
/// # Ok::<(), meridian_btc::Error>(())
/// ```
pub struct StandardWallet {
    secret_key: SecretKey,
    public_key: PublicKey,
    compressed: bool,
    address: String,
    params: &'static ChainParams,
    address_type: AddressType,
}

impl StandardWallet {
    fn from_secret(
        secret_key: SecretKey,
        compressed: bool,
        coin: Coin,
        network: Network,
        address_type: AddressType,
    ) -> Result<Self, Error> {
        let secp = Secp256k1::new();
        let params = ChainParams::get(coin, network);
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        let address = encode_address_with(&secp, &public_key, compressed, params, address_type)?;

        Ok(Self {
            secret_key,
            public_key,
            compressed,
            address,
            params,
            address_type,
        })
    }

    /// Generate a wallet with a random private key.
    ///
    /// # Errors
    ///
    /// Returns an error if the coin does not support `address_type`.
    #[cfg(feature = "rand")]
    pub fn generate(coin: Coin, network: Network, address_type: AddressType) -> Result<Self, Error> {
        let secp = Secp256k1::new();
        let (secret_key, _) = secp.generate_keypair(&mut bitcoin::secp256k1::rand::thread_rng());
        Self::from_secret(secret_key, true, coin, network, address_type)
    }

    /// Import a WIF private key; the version byte selects the network and
    /// the suffix selects compressed or uncompressed public key encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWif`] if the WIF does not belong to `coin`, and
    /// [`Error::UncompressedKey`] for SegWit or Taproot address types on an
    /// uncompressed key.
    pub fn from_wif(wif: &str, coin: Coin, address_type: AddressType) -> Result<Self, Error> {
        let decoded = decode_wif(coin, wif)?;
        Self::from_secret(
            decoded.secret_key,
            decoded.compressed,
            coin,
            decoded.network,
            address_type,
        )
    }

    /// Import a hex-encoded 32-byte private key.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex is invalid or not a valid scalar.
    pub fn from_private_key_hex(
        hex_str: &str,
        coin: Coin,
        network: Network,
        address_type: AddressType,
    ) -> Result<Self, Error> {
        let bytes = Zeroizing::new(decode_hex_array::<32>(hex_str)?);
        let secret_key = SecretKey::from_slice(&bytes[..]).map_err(|_| Error::InvalidPrivateKey)?;
        Self::from_secret(secret_key, true, coin, network, address_type)
    }

    /// Private key in WIF format, keeping the imported compression flag.
    #[must_use]
    pub fn private_key_wif(&self) -> Zeroizing<String> {
        encode_wif(self.params, &self.secret_key, self.compressed)
    }

    /// Private key as hex.
    #[must_use]
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret_key.secret_bytes()))
    }

    /// Public key as hex, uncompressed when imported from an uncompressed WIF.
    #[must_use]
    pub fn public_key_hex(&self) -> String {
        if self.compressed {
            hex::encode(self.public_key.serialize())
        } else {
            hex::encode(self.public_key.serialize_uncompressed())
        }
    }

    /// Whether the public key is used in compressed form.
    #[must_use]
    pub const fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Encoded address.
    #[must_use]
    pub fn address_string(&self) -> &str {
        &self.address
    }

    /// Get the coin.
    #[must_use]
    pub const fn coin(&self) -> Coin {
        self.params.coin
    }

    /// Get the network.
    #[must_use]
    pub const fn network(&self) -> Network {
        self.params.network
    }

    /// Get the address type.
    #[must_use]
    pub const fn address_type(&self) -> AddressType {
        self.address_type
    }
}

impl core::fmt::Debug for StandardWallet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StandardWallet")
            .field("address", &self.address)
            .field("address_type", &self.address_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_from_private_key_hex() {
        let wallet =
            StandardWallet::from_private_key_hex(KEY_ONE_HEX, Coin::Bitcoin, Network::Mainnet, AddressType::P2pkh)
                .unwrap();
        assert_eq!(wallet.address_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(
            wallet.public_key_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(wallet.private_key_hex().as_str(), KEY_ONE_HEX);
        assert_eq!(
            wallet.private_key_wif().as_str(),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
    }

    #[test]
    fn test_wif_roundtrip_keeps_network() {
        let wallet = StandardWallet::from_private_key_hex(
            KEY_ONE_HEX,
            Coin::Dogecoin,
            Network::Testnet,
            AddressType::P2pkh,
        )
        .unwrap();
        let imported =
            StandardWallet::from_wif(&wallet.private_key_wif(), Coin::Dogecoin, AddressType::P2pkh)
                .unwrap();
        assert_eq!(imported.network(), Network::Testnet);
        assert_eq!(imported.address_string(), wallet.address_string());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(StandardWallet::from_private_key_hex("00", Coin::Bitcoin, Network::Mainnet, AddressType::P2pkh).is_err());
        assert!(StandardWallet::from_private_key_hex(
            &"00".repeat(32),
            Coin::Bitcoin,
            Network::Mainnet,
            AddressType::P2pkh
        )
        .is_err());
        assert!(StandardWallet::from_wif("notawif", Coin::Bitcoin, AddressType::P2pkh).is_err());
        assert!(StandardWallet::from_private_key_hex(
            KEY_ONE_HEX,
            Coin::Emercoin,
            Network::Mainnet,
            AddressType::P2tr
        )
        .is_err());
    }

    #[test]
    fn test_uncompressed_wif_keeps_its_address() {
        let wif = "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ";
        let wallet = StandardWallet::from_wif(wif, Coin::Bitcoin, AddressType::P2pkh).unwrap();
        assert!(!wallet.is_compressed());
        assert_eq!(wallet.address_string(), "1GAehh7TsJAHuUAeKZcXf5CnwuGuGgyX2S");
        assert_eq!(wallet.private_key_wif().as_str(), wif);
        assert_eq!(wallet.public_key_hex().len(), 130);
        assert!(wallet.public_key_hex().starts_with("04"));

        let compressed = StandardWallet::from_private_key_hex(
            &wallet.private_key_hex(),
            Coin::Bitcoin,
            Network::Mainnet,
            AddressType::P2pkh,
        )
        .unwrap();
        assert_eq!(compressed.address_string(), "1LoVGDgRs9hTfTNJNuXKSpywcbdvwRXpmK");
    }

    #[test]
    fn test_uncompressed_wif_rejects_segwit() {
        let wif = "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ";
        for address_type in [AddressType::P2shP2wpkh, AddressType::P2wpkh, AddressType::P2tr] {
            assert!(matches!(
                StandardWallet::from_wif(wif, Coin::Bitcoin, address_type),
                Err(Error::UncompressedKey(_))
            ));
        }
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_generate() {
        let a = StandardWallet::generate(Coin::Bitcoin, Network::Mainnet, AddressType::P2wpkh).unwrap();
        let b = StandardWallet::generate(Coin::Bitcoin, Network::Mainnet, AddressType::P2wpkh).unwrap();
        assert!(a.address_string().starts_with("bc1q"));
        assert_ne!(a.address_string(), b.address_string());
    }
}
