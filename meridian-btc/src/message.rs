//! "Signed Message" signatures and raw digest signatures.
//!
//! Message signatures are the compact recoverable form used by wallets since
//! Bitcoin Core 0.3: a header byte followed by `r || s`, base64 encoded. The
//! header encodes the recovery id and whether the signer's address used the
//! compressed public key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bitcoin::consensus::encode::{serialize, VarInt};
use bitcoin::secp256k1::ecdsa::{RecoverableSignature, RecoveryId, Signature};
use bitcoin::secp256k1::{Message, PublicKey, Secp256k1, SecretKey, Signing, Verification};
use meridian::encoding::decode_hex;
use meridian::hash::double_sha256;

use crate::address::{parse_address, program_for};
use crate::{ChainParams, Error};

const SIGNATURE_LEN: usize = 65;
const HEADER_BASE: u8 = 27;
const COMPRESSED_FLAG: u8 = 4;
/// Highest header accepted: BIP-137 uses 35..=42 for SegWit signers.
const HEADER_MAX: u8 = 42;

/// Digest signed for `message` under this chain's magic.
///
/// `sha256d(varint(len(magic)) || magic || varint(len(message)) || message)`
#[must_use]
pub fn signed_message_hash(magic: &str, message: &[u8]) -> [u8; 32] {
    let mut data = serialize(&VarInt(magic.len() as u64));
    data.extend_from_slice(magic.as_bytes());
    data.extend_from_slice(&serialize(&VarInt(message.len() as u64)));
    data.extend_from_slice(message);
    double_sha256(&data)
}

/// Sign `message` with a compressed-key header and return it base64 encoded.
pub fn sign_message<C: Signing>(
    secp: &Secp256k1<C>,
    secret_key: &SecretKey,
    params: &ChainParams,
    message: &[u8],
) -> String {
    let digest = signed_message_hash(params.message_magic, message);
    let signature = secp.sign_ecdsa_recoverable(&Message::from_digest(digest), secret_key);
    let (recovery_id, compact) = signature.serialize_compact();

    let mut out = [0u8; SIGNATURE_LEN];
    // recovery ids are 0..=3
    out[0] = HEADER_BASE + COMPRESSED_FLAG + recovery_id.to_i32() as u8;
    out[1..].copy_from_slice(&compact);
    BASE64.encode(out)
}

/// Verify a base64 message signature against `address`.
///
/// Returns `Ok(false)` when the signature is well formed but was made by a
/// different key.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] for undecodable signatures and
/// [`Error::InvalidAddress`] if `address` does not belong to this chain.
pub fn verify_message<C: Verification>(
    secp: &Secp256k1<C>,
    params: &ChainParams,
    address: &str,
    message: &[u8],
    signature_b64: &str,
) -> Result<bool, Error> {
    let expected = parse_address(address, params)?;

    let bytes = BASE64
        .decode(signature_b64.trim())
        .map_err(|_| Error::InvalidSignature)?;
    if bytes.len() != SIGNATURE_LEN {
        return Err(Error::InvalidSignature);
    }

    let header = bytes[0];
    if !(HEADER_BASE..=HEADER_MAX).contains(&header) {
        return Err(Error::InvalidSignature);
    }
    let offset = header - HEADER_BASE;
    let compressed = offset >= COMPRESSED_FLAG;
    let recovery_id =
        RecoveryId::from_i32(i32::from(offset % 4)).map_err(|_| Error::InvalidSignature)?;

    let signature = RecoverableSignature::from_compact(&bytes[1..], recovery_id)
        .map_err(|_| Error::InvalidSignature)?;
    let digest = signed_message_hash(params.message_magic, message);
    let recovered = secp
        .recover_ecdsa(&Message::from_digest(digest), &signature)
        .map_err(|_| Error::InvalidSignature)?;

    let program = program_for(secp, &recovered, compressed, expected.address_type);
    Ok(program == expected.program)
}

/// Sign a 32-byte digest, returning a low-S DER signature as hex.
pub fn sign_digest<C: Signing>(
    secp: &Secp256k1<C>,
    secret_key: &SecretKey,
    digest: &[u8; 32],
) -> String {
    let signature = secp.sign_ecdsa(&Message::from_digest(*digest), secret_key);
    hex::encode(signature.serialize_der())
}

/// Verify a hex DER signature over a digest against a hex public key.
///
/// High-S signatures do not verify.
///
/// # Errors
///
/// Returns an error if the public key or signature cannot be decoded.
pub fn verify_digest<C: Verification>(
    secp: &Secp256k1<C>,
    public_key_hex: &str,
    digest: &[u8; 32],
    signature_hex: &str,
) -> Result<bool, Error> {
    let public_key = PublicKey::from_slice(&decode_hex(public_key_hex)?)
        .map_err(|_| Error::InvalidPublicKey)?;
    let der = decode_hex(signature_hex).map_err(|_| Error::InvalidSignature)?;
    let signature = Signature::from_der(&der).map_err(|_| Error::InvalidSignature)?;

    Ok(secp
        .verify_ecdsa(&Message::from_digest(*digest), &signature, &public_key)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{encode_address, encode_address_with};
    use crate::{AddressType, Coin, Network};
    use bitcoin::hashes::Hash;
    use bitcoin::sign_message::{signed_msg_hash, MessageSignature};

    fn key(byte: u8) -> (SecretKey, PublicKey) {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&[byte; 32]).unwrap();
        (secret, PublicKey::from_secret_key(&secp, &secret))
    }

    #[test]
    fn test_magic_hash_depends_on_chain() {
        let btc = signed_message_hash(Coin::Bitcoin.params(Network::Mainnet).message_magic, b"hi");
        let ltc = signed_message_hash(Coin::Litecoin.params(Network::Mainnet).message_magic, b"hi");
        let bch = signed_message_hash(Coin::BitcoinCash.params(Network::Mainnet).message_magic, b"hi");
        assert_ne!(btc, ltc);
        assert_eq!(btc, bch);
    }

    #[test]
    fn test_sign_and_verify_every_address_type() {
        let secp = Secp256k1::new();
        let (secret, public) = key(0x42);
        let params = Coin::Bitcoin.params(Network::Mainnet);
        let signature = sign_message(&secp, &secret, params, b"hello meridian");

        for ty in [
            AddressType::P2pkh,
            AddressType::P2shP2wpkh,
            AddressType::P2wpkh,
            AddressType::P2tr,
        ] {
            let address = encode_address(&secp, &public, params, ty).unwrap();
            assert!(
                verify_message(&secp, params, &address, b"hello meridian", &signature).unwrap(),
                "{ty}"
            );
            assert!(!verify_message(&secp, params, &address, b"other", &signature).unwrap());
        }
    }

    /// Sign with an explicit header base instead of the compressed default.
    fn sign_with_header(secret: &SecretKey, params: &ChainParams, message: &[u8], base: u8) -> String {
        let secp = Secp256k1::new();
        let digest = signed_message_hash(params.message_magic, message);
        let signature = secp.sign_ecdsa_recoverable(&Message::from_digest(digest), secret);
        let (recovery_id, compact) = signature.serialize_compact();
        let mut out = [0u8; SIGNATURE_LEN];
        out[0] = base + recovery_id.to_i32() as u8;
        out[1..].copy_from_slice(&compact);
        BASE64.encode(out)
    }

    #[test]
    fn test_uncompressed_headers() {
        let secp = Secp256k1::new();
        let (secret, public) = key(0x11);
        let params = Coin::Bitcoin.params(Network::Mainnet);
        let uncompressed = encode_address_with(&secp, &public, false, params, AddressType::P2pkh).unwrap();
        let compressed = encode_address(&secp, &public, params, AddressType::P2pkh).unwrap();

        let signature = sign_with_header(&secret, params, b"legacy", 27);
        assert!((27..=30).contains(&BASE64.decode(&signature).unwrap()[0]));
        assert!(verify_message(&secp, params, &uncompressed, b"legacy", &signature).unwrap());
        assert!(!verify_message(&secp, params, &compressed, b"legacy", &signature).unwrap());
    }

    #[test]
    fn test_segwit_headers() {
        let secp = Secp256k1::new();
        let (secret, public) = key(0x12);
        let params = Coin::Bitcoin.params(Network::Mainnet);

        let nested = encode_address(&secp, &public, params, AddressType::P2shP2wpkh).unwrap();
        assert!(nested.starts_with('3'));
        let signature = sign_with_header(&secret, params, b"segwit", 35);
        assert!((35..=38).contains(&BASE64.decode(&signature).unwrap()[0]));
        assert!(verify_message(&secp, params, &nested, b"segwit", &signature).unwrap());

        let native = encode_address(&secp, &public, params, AddressType::P2wpkh).unwrap();
        assert!(native.starts_with("bc1q"));
        let signature = sign_with_header(&secret, params, b"segwit", 39);
        assert!((39..=42).contains(&BASE64.decode(&signature).unwrap()[0]));
        assert!(verify_message(&secp, params, &native, b"segwit", &signature).unwrap());

        let (_, other) = key(0x13);
        let foreign = encode_address(&secp, &other, params, AddressType::P2wpkh).unwrap();
        assert!(!verify_message(&secp, params, &foreign, b"segwit", &signature).unwrap());
    }

    #[test]
    fn test_accepts_rust_bitcoin_signatures() {
        let secp = Secp256k1::new();
        let (secret, public) = key(0x21);
        let params = Coin::Bitcoin.params(Network::Mainnet);
        let message = "vires is numeris";

        let digest = signed_msg_hash(message).to_byte_array();
        assert_eq!(digest, signed_message_hash(params.message_magic, message.as_bytes()));
        let recoverable = secp.sign_ecdsa_recoverable(&Message::from_digest(digest), &secret);

        for compressed in [true, false] {
            let signature = BASE64.encode(MessageSignature::new(recoverable, compressed).serialize());
            let address = encode_address_with(&secp, &public, compressed, params, AddressType::P2pkh).unwrap();
            assert!(
                verify_message(&secp, params, &address, message.as_bytes(), &signature).unwrap(),
                "compressed={compressed}"
            );
        }
    }

    #[test]
    fn test_verify_cashaddr() {
        let secp = Secp256k1::new();
        let (secret, public) = key(0x07);
        let params = Coin::BitcoinCash.params(Network::Mainnet);
        let address = encode_address(&secp, &public, params, AddressType::CashAddr).unwrap();
        let signature = sign_message(&secp, &secret, params, b"cash");
        assert!(verify_message(&secp, params, &address, b"cash", &signature).unwrap());
    }

    #[test]
    fn test_other_key_is_false_not_error() {
        let secp = Secp256k1::new();
        let (secret, _) = key(0x01);
        let (_, other) = key(0x02);
        let params = Coin::Dogecoin.params(Network::Mainnet);
        let address = encode_address(&secp, &other, params, AddressType::P2pkh).unwrap();
        let signature = sign_message(&secp, &secret, params, b"x");
        assert!(!verify_message(&secp, params, &address, b"x", &signature).unwrap());
    }

    #[test]
    fn test_malformed_signature_is_error() {
        let secp = Secp256k1::new();
        let (_, public) = key(0x03);
        let params = Coin::Bitcoin.params(Network::Mainnet);
        let address = encode_address(&secp, &public, params, AddressType::P2pkh).unwrap();

        assert!(verify_message(&secp, params, &address, b"x", "not base64!").is_err());
        assert!(verify_message(&secp, params, &address, b"x", &BASE64.encode([0u8; 64])).is_err());
        let mut bad_header = [1u8; 65];
        bad_header[0] = 10;
        assert!(verify_message(&secp, params, &address, b"x", &BASE64.encode(bad_header)).is_err());
    }

    #[test]
    fn test_digest_roundtrip_and_low_s() {
        let secp = Secp256k1::new();
        let (secret, public) = key(0x09);
        let digest = [0xab; 32];
        let der = sign_digest(&secp, &secret, &digest);

        let mut sig = Signature::from_der(&hex::decode(&der).unwrap()).unwrap();
        let before = sig;
        sig.normalize_s();
        assert_eq!(sig, before);

        let pk_hex = hex::encode(public.serialize());
        assert!(verify_digest(&secp, &pk_hex, &digest, &der).unwrap());
        assert!(!verify_digest(&secp, &pk_hex, &[0xcd; 32], &der).unwrap());
        assert!(verify_digest(&secp, &pk_hex, &digest, "3006").is_err());
        assert!(verify_digest(&secp, "02", &digest, &der).is_err());
    }
}
