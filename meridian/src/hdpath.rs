//! BIP-32 derivation paths.
//!
//! Paths are parsed once into a typed [`DerivationPath`] and handed to the
//! chain crates as a sequence of [`ChildIndex`] values, so no chain ever has
//! to splice or re-parse path strings.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// A child index in a derivation path.
///
/// Hardened indices are >= 2^31 in raw form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Normal (non-hardened) index: 0 to 2^31 - 1
    Normal(u32),
    /// Hardened index: displayed as n', stored as n
    Hardened(u32),
}

impl ChildIndex {
    /// The offset for hardened indices (2^31).
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Create a normal (non-hardened) child index.
    pub fn normal(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            return Err(Error::InvalidDerivationPath(format!(
                "index {index} out of range"
            )));
        }
        Ok(Self::Normal(index))
    }

    /// Create a hardened child index.
    pub fn hardened(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            return Err(Error::InvalidDerivationPath(format!(
                "index {index}' out of range"
            )));
        }
        Ok(Self::Hardened(index))
    }

    /// Check if this is a hardened index.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Get the raw index value (without hardened flag).
    pub const fn index(&self) -> u32 {
        match self {
            Self::Normal(i) | Self::Hardened(i) => *i,
        }
    }

    /// Convert to the raw u32 value used in BIP-32 derivation.
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i | Self::HARDENED_OFFSET,
        }
    }
}

impl From<u32> for ChildIndex {
    fn from(value: u32) -> Self {
        if value >= Self::HARDENED_OFFSET {
            Self::Hardened(value & !Self::HARDENED_OFFSET)
        } else {
            Self::Normal(value)
        }
    }
}

impl From<ChildIndex> for u32 {
    fn from(index: ChildIndex) -> Self {
        index.to_u32()
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{i}"),
            Self::Hardened(i) => write!(f, "{i}'"),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidDerivationPath(format!("invalid component \"{s}\""));

        match s.strip_suffix(&['\'', 'h', 'H'][..]) {
            Some(digits) => Self::hardened(digits.parse().map_err(|_| invalid())?),
            None => Self::normal(s.parse().map_err(|_| invalid())?),
        }
    }
}

/// A BIP-32 derivation path such as `m/44'/60'/0'/0/0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// The empty path (the root key itself).
    pub const fn master() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Create a derivation path from child indices.
    pub fn new(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }

    /// Parse a derivation path.
    ///
    /// Accepts `m`, `M`, the empty string, `m/44'/60'/0'/0/0`,
    /// `m/44h/60h/0h/0/0` and the bare form `44'/60'/0'/0/0`.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() || path == "m" || path == "M" {
            return Ok(Self::master());
        }

        let body = path
            .strip_prefix("m/")
            .or_else(|| path.strip_prefix("M/"))
            .unwrap_or(path);

        let indices = body
            .split('/')
            .map(|component| {
                if component.is_empty() {
                    Err(Error::InvalidDerivationPath(format!("empty component in \"{path}\"")))
                } else {
                    component.parse()
                }
            })
            .collect::<Result<Vec<ChildIndex>>>()?;

        Ok(Self { indices })
    }

    /// Standard five-level path: `m/purpose'/coin_type'/account'/change/address_index`.
    pub fn bip44(
        purpose: u32,
        coin_type: u32,
        account: u32,
        change: u32,
        address_index: u32,
    ) -> Result<Self> {
        Ok(Self {
            indices: vec![
                ChildIndex::hardened(purpose)?,
                ChildIndex::hardened(coin_type)?,
                ChildIndex::hardened(account)?,
                ChildIndex::normal(change)?,
                ChildIndex::normal(address_index)?,
            ],
        })
    }

    /// Account-level path: `m/purpose'/coin_type'/account'`.
    pub fn account(purpose: u32, coin_type: u32, account: u32) -> Result<Self> {
        Ok(Self {
            indices: vec![
                ChildIndex::hardened(purpose)?,
                ChildIndex::hardened(coin_type)?,
                ChildIndex::hardened(account)?,
            ],
        })
    }

    /// Get the child indices in this path.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Raw BIP-32 indices (hardened offset applied).
    pub fn to_u32_vec(&self) -> Vec<u32> {
        self.indices.iter().map(ChildIndex::to_u32).collect()
    }

    /// Number of levels in this path.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Check if this path is empty (the root key).
    pub fn is_master(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check if any index in the path is hardened.
    pub fn has_hardened(&self) -> bool {
        self.indices.iter().any(ChildIndex::is_hardened)
    }

    /// Append a child index.
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }

    /// Append a normal child index.
    pub fn normal_child(&self, index: u32) -> Result<Self> {
        Ok(self.child(ChildIndex::normal(index)?))
    }

    /// Append a hardened child index.
    pub fn hardened_child(&self, index: u32) -> Result<Self> {
        Ok(self.child(ChildIndex::hardened(index)?))
    }

    /// Get the parent path, if any.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.indices.split_last()?;
        Some(Self {
            indices: rest.to_vec(),
        })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
