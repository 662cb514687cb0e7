//! Address types and their BIP purposes.

use core::fmt;
use core::str::FromStr;

/// Bitcoin-family address types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressType {
    /// Pay to Public Key Hash (Legacy), works on every coin.
    P2pkh,
    /// P2WPKH nested in P2SH (BIP-49).
    P2shP2wpkh,
    /// Native SegWit v0 (BIP-84).
    #[default]
    P2wpkh,
    /// Taproot key-path spend (BIP-86), Bitcoin only.
    P2tr,
    /// Bitcoin Cash CashAddr P2PKH, derived under purpose 44.
    CashAddr,
}

impl AddressType {
    /// Get the BIP purpose for this address type.
    #[inline]
    #[must_use]
    pub const fn purpose(self) -> u32 {
        match self {
            Self::P2pkh | Self::CashAddr => 44,
            Self::P2shP2wpkh => 49,
            Self::P2wpkh => 84,
            Self::P2tr => 86,
        }
    }

    /// Short machine-friendly name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P2pkh => "p2pkh",
            Self::P2shP2wpkh => "p2sh-p2wpkh",
            Self::P2wpkh => "p2wpkh",
            Self::P2tr => "p2tr",
            Self::CashAddr => "cashaddr",
        }
    }

    /// Human-readable name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::P2pkh => "P2PKH (Legacy)",
            Self::P2shP2wpkh => "P2SH-P2WPKH (SegWit)",
            Self::P2wpkh => "P2WPKH (Native SegWit)",
            Self::P2tr => "P2TR (Taproot)",
            Self::CashAddr => "CashAddr",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an invalid address type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid address type, expected: p2pkh, p2sh, p2wpkh, p2tr or cashaddr")]
pub struct ParseAddressTypeError;

impl FromStr for AddressType {
    type Err = ParseAddressTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "p2pkh" | "legacy" => Ok(Self::P2pkh),
            "p2sh" | "p2sh-p2wpkh" | "segwit" | "nested-segwit" => Ok(Self::P2shP2wpkh),
            "p2wpkh" | "native-segwit" | "bech32" => Ok(Self::P2wpkh),
            "p2tr" | "taproot" | "bech32m" => Ok(Self::P2tr),
            "cashaddr" | "cash" => Ok(Self::CashAddr),
            _ => Err(ParseAddressTypeError),
        }
    }
}
