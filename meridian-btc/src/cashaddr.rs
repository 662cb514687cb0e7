//! Bitcoin Cash CashAddr encoding.
//!
//! A CashAddr string is `prefix:payload`, where the payload is the version
//! byte and hash160 regrouped into 5-bit words, followed by a 40-bit BCH
//! checksum, all written in the bech32 alphabet.

use bech32::primitives::checksum::{Engine, PackedFe32};
use bech32::{ByteIterExt, Checksum, Fe32, Fe32IterExt};

use crate::Error;

const CHECKSUM_WORDS: usize = 8;
const HASH_LEN: usize = 20;

/// The 40-bit BCH code protecting CashAddr strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CashAddrChecksum {}

impl Checksum for CashAddrChecksum {
    type MidstateRepr = u64;
    const CODE_LENGTH: usize = 1023;
    const CHECKSUM_LENGTH: usize = CHECKSUM_WORDS;
    const GENERATOR_SH: [u64; 5] = [
        0x98_f2bc_8e61,
        0x79_b76d_99e2,
        0xf3_3e5f_b3c4,
        0xae_2eab_e2a8,
        0x1e_4f43_e470,
    ];
    const TARGET_RESIDUE: u64 = 1;
}

/// Kind of hash carried by a CashAddr payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashAddrKind {
    /// Public key hash.
    P2pkh,
    /// Script hash.
    P2sh,
}

impl CashAddrKind {
    const fn type_bits(self) -> u8 {
        match self {
            Self::P2pkh => 0,
            Self::P2sh => 1,
        }
    }
}

fn fe(value: u8) -> Fe32 {
    // masked to five bits, so the conversion cannot fail
    Fe32::try_from(value & 0x1f).unwrap_or(Fe32::Q)
}

/// Checksum engine primed with the prefix: the lower five bits of each
/// character, then a zero separator.
fn engine_for(prefix: &str) -> Engine<CashAddrChecksum> {
    let mut engine = Engine::new();
    for b in prefix.bytes().chain(core::iter::once(0)) {
        engine.input_fe(fe(b));
    }
    engine
}

/// Encode a 20-byte hash as a CashAddr string with the given prefix.
#[must_use]
pub fn encode(prefix: &str, kind: CashAddrKind, hash: &[u8; HASH_LEN]) -> String {
    let words: Vec<Fe32> = core::iter::once(kind.type_bits() << 3)
        .chain(hash.iter().copied())
        .bytes_to_fes()
        .collect();

    let mut engine = engine_for(prefix);
    for &w in &words {
        engine.input_fe(w);
    }
    engine.input_target_residue();
    let checksum = *engine.residue();

    let mut out = String::with_capacity(prefix.len() + 1 + words.len() + CHECKSUM_WORDS);
    out.push_str(prefix);
    out.push(':');
    out.extend(words.iter().map(|w| w.to_char()));
    out.extend((0..CHECKSUM_WORDS).rev().map(|i| fe(checksum.unpack(i)).to_char()));
    out
}

/// Decode a CashAddr string.
///
/// The prefix may be omitted, in which case `default_prefix` is assumed.
/// A prefix that differs from `default_prefix` is rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] on mixed case, unknown characters, a bad
/// checksum, a foreign prefix or a payload that is not a 20-byte hash.
pub fn decode(address: &str, default_prefix: &str) -> Result<(CashAddrKind, [u8; HASH_LEN]), Error> {
    let invalid = |reason: &str| Error::InvalidAddress(format!("{address}: {reason}"));

    let has_lower = address.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = address.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(invalid("mixed case"));
    }
    let lowered = address.to_ascii_lowercase();

    let (prefix, body) = match lowered.split_once(':') {
        Some((prefix, body)) => (prefix, body),
        None => (default_prefix, lowered.as_str()),
    };
    if prefix != default_prefix {
        return Err(invalid("wrong prefix"));
    }
    if body.len() <= CHECKSUM_WORDS {
        return Err(invalid("too short"));
    }

    let words = body
        .chars()
        .map(|c| Fe32::from_char(c).map_err(|_| invalid("invalid character")))
        .collect::<Result<Vec<Fe32>, Error>>()?;

    let mut engine = engine_for(prefix);
    for &w in &words {
        engine.input_fe(w);
    }
    if *engine.residue() != CashAddrChecksum::TARGET_RESIDUE {
        return Err(invalid("checksum mismatch"));
    }

    let data = &words[..words.len() - CHECKSUM_WORDS];
    let payload: Vec<u8> = data.iter().copied().fes_to_bytes().collect();
    // padding must be shorter than one word and all zero
    if !payload.iter().copied().bytes_to_fes().eq(data.iter().copied()) {
        return Err(invalid("bad padding"));
    }
    let (&version, hash) = payload
        .split_first()
        .ok_or_else(|| invalid("empty payload"))?;

    if version & 0x80 != 0 || version & 0x07 != 0 {
        return Err(invalid("unsupported version"));
    }
    let kind = match version >> 3 {
        0 => CashAddrKind::P2pkh,
        1 => CashAddrKind::P2sh,
        _ => return Err(invalid("unknown type")),
    };
    let hash: [u8; HASH_LEN] = hash.try_into().map_err(|_| invalid("bad hash length"))?;

    Ok((kind, hash))
}
