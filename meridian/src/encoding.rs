//! Base58Check helpers shared by the chain crates.
//!
//! Bitcoin-family, EOS and extended-key serialisations all wrap their payload
//! as `version || payload || sha256d(version || payload)[..4]`. Version
//! prefixes range from one byte (addresses, WIF) to four (xprv/xpub).

use crate::error::{Error, Result};
use crate::hash::double_sha256;

/// Length of the Base58Check checksum suffix.
pub const CHECKSUM_LEN: usize = 4;

/// Encode bytes to Base58Check with an arbitrary-length version prefix.
pub fn base58check_encode(version: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(version.len() + payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(version);
    data.extend_from_slice(payload);

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);

    bs58::encode(data).into_string()
}

/// Decode a Base58Check string, splitting off `version_len` prefix bytes.
///
/// Returns `(version, payload)`.
pub fn base58check_decode(encoded: &str, version_len: usize) -> Result<(Vec<u8>, Vec<u8>)> {
    let data = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| Error::InvalidEncoding)?;

    let min_len = version_len + CHECKSUM_LEN + 1;
    if data.len() < min_len {
        return Err(Error::InvalidLength {
            expected: min_len,
            actual: data.len(),
        });
    }

    let (body, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
    let computed = double_sha256(body);
    if checksum != &computed[..CHECKSUM_LEN] {
        return Err(Error::InvalidChecksum);
    }

    let (version, payload) = body.split_at(version_len);
    Ok((version.to_vec(), payload.to_vec()))
}

/// Decode hex, tolerating an optional `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let input = input.trim();
    let input = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(input).map_err(|_| Error::InvalidEncoding)
}

/// Decode hex into a fixed-size array.
pub fn decode_hex_array<const N: usize>(input: &str) -> Result<[u8; N]> {
    let bytes = decode_hex(input)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| Error::InvalidLength {
        expected: N,
        actual,
    })
}
