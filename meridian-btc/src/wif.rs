//! Wallet Import Format with per-coin version bytes.

use bitcoin::secp256k1::SecretKey;
use meridian::encoding::{base58check_decode, base58check_encode};
use zeroize::Zeroizing;

use crate::{ChainParams, Coin, Error, Network};

const COMPRESSED_SUFFIX: u8 = 0x01;

/// A decoded WIF key.
#[derive(Debug)]
pub struct DecodedWif {
    /// Secret scalar.
    pub secret_key: SecretKey,
    /// Network selected by the version byte.
    pub network: Network,
    /// Whether the key is flagged for compressed public keys.
    pub compressed: bool,
}

/// Encode a secret key as WIF with the coin's version byte.
#[must_use]
pub fn encode_wif(params: &ChainParams, secret_key: &SecretKey, compressed: bool) -> Zeroizing<String> {
    let mut payload = Zeroizing::new(Vec::with_capacity(33));
    payload.extend_from_slice(&secret_key.secret_bytes());
    if compressed {
        payload.push(COMPRESSED_SUFFIX);
    }
    Zeroizing::new(base58check_encode(&[params.wif_prefix], &payload))
}

/// Decode a WIF key for `coin`, picking the network from its version byte.
///
/// When mainnet and testnet share a version byte (Dash and Bitcoin testnet,
/// for instance), mainnet wins.
///
/// # Errors
///
/// Returns [`Error::InvalidWif`] if the string is not Base58Check, has a bad
/// length or suffix, or its version matches neither of the coin's networks.
pub fn decode_wif(coin: Coin, wif: &str) -> Result<DecodedWif, Error> {
    let (version, payload) = base58check_decode(wif.trim(), 1).map_err(|_| Error::InvalidWif)?;
    let payload = Zeroizing::new(payload);

    let network = [Network::Mainnet, Network::Testnet]
        .into_iter()
        .find(|&n| ChainParams::get(coin, n).wif_prefix == version[0])
        .ok_or(Error::InvalidWif)?;

    let (key, compressed) = match payload.len() {
        32 => (&payload[..], false),
        33 if payload[32] == COMPRESSED_SUFFIX => (&payload[..32], true),
        _ => return Err(Error::InvalidWif),
    };
    let secret_key = SecretKey::from_slice(key).map_err(|_| Error::InvalidPrivateKey)?;

    Ok(DecodedWif {
        secret_key,
        network,
        compressed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Private key 1, the well-known WIF test vector.
    const KEY_ONE_WIF: &str = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
    const KEY_ONE_WIF_UNCOMPRESSED: &str = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf";

    fn key_one() -> SecretKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        SecretKey::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_bitcoin_vectors() {
        let params = Coin::Bitcoin.params(Network::Mainnet);
        assert_eq!(encode_wif(params, &key_one(), true).as_str(), KEY_ONE_WIF);
        assert_eq!(encode_wif(params, &key_one(), false).as_str(), KEY_ONE_WIF_UNCOMPRESSED);

        let decoded = decode_wif(Coin::Bitcoin, KEY_ONE_WIF).unwrap();
        assert_eq!(decoded.secret_key, key_one());
        assert_eq!(decoded.network, Network::Mainnet);
        assert!(decoded.compressed);

        assert!(!decode_wif(Coin::Bitcoin, KEY_ONE_WIF_UNCOMPRESSED).unwrap().compressed);
    }

    #[test]
    fn test_network_from_version() {
        let testnet = Coin::Litecoin.params(Network::Testnet);
        let wif = encode_wif(testnet, &key_one(), true);
        assert_eq!(decode_wif(Coin::Litecoin, &wif).unwrap().network, Network::Testnet);
    }

    #[test]
    fn test_foreign_coin_rejected() {
        let doge = Coin::Dogecoin.params(Network::Mainnet);
        let wif = encode_wif(doge, &key_one(), true);
        assert!(wif.starts_with('Q'));
        assert!(matches!(decode_wif(Coin::Litecoin, &wif), Err(Error::InvalidWif)));
        assert!(decode_wif(Coin::Dogecoin, &wif).is_ok());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(decode_wif(Coin::Bitcoin, "").is_err());
        assert!(decode_wif(Coin::Bitcoin, "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWo").is_err());
    }
}
