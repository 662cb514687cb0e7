//! Derivation path styles used by popular Ethereum wallets.

use core::fmt;
use core::str::FromStr;

use meridian::DerivationPath;

use crate::Error;

/// BIP-44 coin type for Ethereum.
pub const COIN_TYPE: u32 = 60;
const PURPOSE: u32 = 44;

/// Where the varying index sits in the path.
///
/// - **Standard** (MetaMask, Trezor): `m/44'/60'/0'/0/{index}`
/// - **Ledger Live**: `m/44'/60'/{index}'/0/0`
/// - **Ledger Legacy** (MEW, MyCrypto): `m/44'/60'/0'/{index}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DerivationStyle {
    /// Index is the address index.
    #[default]
    Standard,
    /// Index is the hardened account.
    LedgerLive,
    /// Four-level path, index at the fourth level.
    LedgerLegacy,
}

impl DerivationStyle {
    /// Every style, in display order.
    pub const ALL: [Self; 3] = [Self::Standard, Self::LedgerLive, Self::LedgerLegacy];

    /// Derivation path for `index` under this style.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is at or above the hardened offset.
    pub fn path(self, index: u32) -> Result<DerivationPath, Error> {
        let path = match self {
            Self::Standard => DerivationPath::bip44(PURPOSE, COIN_TYPE, 0, 0, index)?,
            Self::LedgerLive => DerivationPath::bip44(PURPOSE, COIN_TYPE, index, 0, 0)?,
            Self::LedgerLegacy => {
                DerivationPath::account(PURPOSE, COIN_TYPE, 0)?.normal_child(index)?
            }
        };
        Ok(path)
    }

    /// Short identifier for CLI usage.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::LedgerLive => "ledger-live",
            Self::LedgerLegacy => "ledger-legacy",
        }
    }
}

impl fmt::Display for DerivationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "Standard (MetaMask/Trezor)",
            Self::LedgerLive => "Ledger Live",
            Self::LedgerLegacy => "Ledger Legacy (MEW/MyCrypto)",
        })
    }
}

/// Error returned when parsing an unknown style name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown derivation style '{0}', expected: standard, ledger-live or ledger-legacy")]
pub struct ParseDerivationStyleError(pub String);

impl FromStr for DerivationStyle {
    type Err = ParseDerivationStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "metamask" | "trezor" | "bip44" => Ok(Self::Standard),
            "ledger-live" | "ledgerlive" | "live" => Ok(Self::LedgerLive),
            "ledger-legacy" | "ledgerlegacy" | "legacy" | "mew" | "mycrypto" => {
                Ok(Self::LedgerLegacy)
            }
            _ => Err(ParseDerivationStyleError(s.to_owned())),
        }
    }
}
