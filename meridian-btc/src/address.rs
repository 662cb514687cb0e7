//! Address encoding and parsing for every Bitcoin-family coin.
//!
//! All formats are driven by [`ChainParams`]: Base58Check version bytes for
//! P2PKH/P2SH, the bech32 HRP for SegWit and Taproot, and the CashAddr prefix
//! for Bitcoin Cash.

use bitcoin::key::TapTweak;
use bitcoin::secp256k1::{PublicKey, Secp256k1, Verification};
use meridian::encoding::{base58check_decode, base58check_encode};
use meridian::hash::hash160;

use crate::cashaddr::{self, CashAddrKind};
use crate::{AddressType, ChainParams, Error};

/// A parsed address: its type and the hash or witness program it commits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPayload {
    /// Detected address type. A Base58 P2SH address is reported as
    /// [`AddressType::P2shP2wpkh`].
    pub address_type: AddressType,
    /// hash160, script hash, or witness program.
    pub program: Vec<u8>,
}

/// Encode bytes as a SegWit address (bech32 for v0, bech32m for v1+).
pub(crate) fn bech32_encode(hrp: &str, version: u8, program: &[u8]) -> Result<String, Error> {
    let invalid = || Error::InvalidAddress(format!("cannot encode witness program for {hrp}"));
    let hrp = bech32::Hrp::parse(hrp).map_err(|_| invalid())?;
    let version = bech32::Fe32::try_from(version).map_err(|_| invalid())?;
    bech32::segwit::encode(hrp, version, program).map_err(|_| invalid())
}

/// P2SH-P2WPKH redeem script: `OP_0 PUSH20 <hash160>`.
fn p2wpkh_script(key_hash: &[u8; 20]) -> [u8; 22] {
    let mut script = [0u8; 22];
    script[0] = 0x00;
    script[1] = 0x14;
    script[2..].copy_from_slice(key_hash);
    script
}

fn taproot_output_key<C: Verification>(secp: &Secp256k1<C>, public_key: &PublicKey) -> [u8; 32] {
    let (internal, _) = public_key.x_only_public_key();
    let (tweaked, _) = internal.tap_tweak(secp, None);
    tweaked.to_inner().serialize()
}

/// Compute the program an address of `address_type` commits to for `public_key`.
///
/// `compressed` only matters for P2PKH and CashAddr; SegWit and Taproot
/// always use the compressed point.
pub fn program_for<C: Verification>(
    secp: &Secp256k1<C>,
    public_key: &PublicKey,
    compressed: bool,
    address_type: AddressType,
) -> Vec<u8> {
    let key_hash = if compressed {
        hash160(&public_key.serialize())
    } else {
        hash160(&public_key.serialize_uncompressed())
    };

    match address_type {
        AddressType::P2pkh | AddressType::CashAddr => key_hash.to_vec(),
        AddressType::P2shP2wpkh => {
            let compressed_hash = hash160(&public_key.serialize());
            hash160(&p2wpkh_script(&compressed_hash)).to_vec()
        }
        AddressType::P2wpkh => hash160(&public_key.serialize()).to_vec(),
        AddressType::P2tr => taproot_output_key(secp, public_key).to_vec(),
    }
}

/// Encode the address of `address_type` for a compressed public key.
///
/// # Errors
///
/// Returns [`Error::UnsupportedAddressType`] if the coin has no encoding for
/// `address_type`.
pub fn encode_address<C: Verification>(
    secp: &Secp256k1<C>,
    public_key: &PublicKey,
    params: &ChainParams,
    address_type: AddressType,
) -> Result<String, Error> {
    encode_address_with(secp, public_key, true, params, address_type)
}

/// Encode an address, hashing the uncompressed point when `compressed` is
/// false. Only P2PKH and CashAddr can commit to an uncompressed key.
pub(crate) fn encode_address_with<C: Verification>(
    secp: &Secp256k1<C>,
    public_key: &PublicKey,
    compressed: bool,
    params: &ChainParams,
    address_type: AddressType,
) -> Result<String, Error> {
    if !params.supports(address_type) {
        return Err(Error::UnsupportedAddressType {
            coin: params.coin,
            address_type,
        });
    }
    if !compressed && !matches!(address_type, AddressType::P2pkh | AddressType::CashAddr) {
        return Err(Error::UncompressedKey(address_type));
    }

    let program = program_for(secp, public_key, compressed, address_type);
    match address_type {
        AddressType::P2pkh => Ok(base58check_encode(&[params.p2pkh_prefix], &program)),
        AddressType::P2shP2wpkh => Ok(base58check_encode(&[params.p2sh_prefix], &program)),
        AddressType::P2wpkh | AddressType::P2tr => {
            let version = u8::from(address_type == AddressType::P2tr);
            // supports() guarantees the HRP is present
            let hrp = params.bech32_hrp.unwrap_or_default();
            bech32_encode(hrp, version, &program)
        }
        AddressType::CashAddr => {
            let prefix = params.cashaddr_prefix.unwrap_or_default();
            let hash: [u8; 20] = program
                .try_into()
                .map_err(|_| Error::InvalidPublicKey)?;
            Ok(cashaddr::encode(prefix, CashAddrKind::P2pkh, &hash))
        }
    }
}

/// Parse an address of this coin and network.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if the string is not a valid address for
/// `params`.
pub fn parse_address(address: &str, params: &ChainParams) -> Result<AddressPayload, Error> {
    let invalid = |reason: &str| Error::InvalidAddress(format!("{address}: {reason}"));

    if let Some(prefix) = params.cashaddr_prefix {
        let looks_cash = address.contains(':') || address.starts_with(&['q', 'p', 'Q', 'P'][..]);
        if looks_cash {
            let (kind, hash) = cashaddr::decode(address, prefix)?;
            let address_type = match kind {
                CashAddrKind::P2pkh => AddressType::CashAddr,
                CashAddrKind::P2sh => return Err(invalid("script-hash cashaddr")),
            };
            return Ok(AddressPayload {
                address_type,
                program: hash.to_vec(),
            });
        }
    }

    if let Some(hrp) = params.bech32_hrp {
        let lowered = address.to_ascii_lowercase();
        if lowered.starts_with(&format!("{hrp}1")) {
            let (decoded_hrp, version, program) =
                bech32::segwit::decode(address).map_err(|_| invalid("bad bech32"))?;
            if decoded_hrp.to_lowercase() != hrp {
                return Err(invalid("wrong network"));
            }
            let address_type = match (version.to_u8(), program.len()) {
                (0, 20) => AddressType::P2wpkh,
                (1, 32) => AddressType::P2tr,
                _ => return Err(invalid("unsupported witness program")),
            };
            return Ok(AddressPayload {
                address_type,
                program,
            });
        }
    }

    let (version, payload) = base58check_decode(address, 1).map_err(|_| invalid("bad base58"))?;
    if payload.len() != 20 {
        return Err(invalid("bad hash length"));
    }
    let address_type = match version[0] {
        v if v == params.p2pkh_prefix => AddressType::P2pkh,
        v if v == params.p2sh_prefix => AddressType::P2shP2wpkh,
        _ => return Err(invalid("wrong version byte")),
    };
    Ok(AddressPayload {
        address_type,
        program: payload,
    })
}

/// Check that `address` parses for this coin and network.
#[must_use]
pub fn is_valid_address(address: &str, params: &ChainParams) -> bool {
    parse_address(address, params).is_ok()
}
