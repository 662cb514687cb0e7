//! Supported blockchains.

use core::fmt;
use core::str::FromStr;

use meridian_btc::{Coin, Network};

/// A blockchain Meridian can derive keys for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blockchain {
    /// Bitcoin.
    Btc,
    /// Litecoin.
    Ltc,
    /// Bitcoin Cash.
    Bch,
    /// Bitcoin SV.
    Bsv,
    /// Dogecoin.
    Doge,
    /// Dash.
    Dash,
    /// Emercoin.
    Emc,
    /// Ethereum.
    Eth,
    /// EOS.
    Eos,
    /// XRP Ledger.
    Xrp,
}

impl Blockchain {
    /// Every supported blockchain.
    pub const ALL: [Self; 10] = [
        Self::Btc,
        Self::Ltc,
        Self::Bch,
        Self::Bsv,
        Self::Doge,
        Self::Dash,
        Self::Emc,
        Self::Eth,
        Self::Eos,
        Self::Xrp,
    ];

    /// Ticker symbol.
    #[must_use]
    pub const fn ticker(self) -> &'static str {
        match self.coin() {
            Some(coin) => coin.ticker(),
            None => match self {
                Self::Eth => "ETH",
                Self::Eos => "EOS",
                _ => "XRP",
            },
        }
    }

    /// Full name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Btc => "Bitcoin",
            Self::Ltc => "Litecoin",
            Self::Bch => "Bitcoin Cash",
            Self::Bsv => "Bitcoin SV",
            Self::Doge => "Dogecoin",
            Self::Dash => "Dash",
            Self::Emc => "Emercoin",
            Self::Eth => "Ethereum",
            Self::Eos => "EOS",
            Self::Xrp => "Ripple",
        }
    }

    /// Bitcoin-family coin, `None` for account-model chains.
    #[must_use]
    pub const fn coin(self) -> Option<Coin> {
        match self {
            Self::Btc => Some(Coin::Bitcoin),
            Self::Ltc => Some(Coin::Litecoin),
            Self::Bch => Some(Coin::BitcoinCash),
            Self::Bsv => Some(Coin::BitcoinSv),
            Self::Doge => Some(Coin::Dogecoin),
            Self::Dash => Some(Coin::Dash),
            Self::Emc => Some(Coin::Emercoin),
            Self::Eth | Self::Eos | Self::Xrp => None,
        }
    }

    /// Whether the chain has parameters for `network`.
    #[must_use]
    pub const fn supports(self, network: Network) -> bool {
        self.coin().is_some() || matches!(network, Network::Mainnet)
    }

    /// BIP-44 coin type on `network`.
    #[must_use]
    pub const fn coin_type(self, network: Network) -> u32 {
        match self.coin() {
            Some(coin) => coin.params(network).coin_type,
            None => match self {
                Self::Eth => meridian_eth::COIN_TYPE,
                Self::Eos => meridian_eos::COIN_TYPE,
                _ => meridian_xrp::COIN_TYPE,
            },
        }
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

impl From<Coin> for Blockchain {
    fn from(coin: Coin) -> Self {
        match coin {
            Coin::Bitcoin => Self::Btc,
            Coin::Litecoin => Self::Ltc,
            Coin::BitcoinCash => Self::Bch,
            Coin::BitcoinSv => Self::Bsv,
            Coin::Dogecoin => Self::Doge,
            Coin::Dash => Self::Dash,
            Coin::Emercoin => Self::Emc,
        }
    }
}

/// Error returned when parsing an unknown blockchain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blockchain: {0}")]
pub struct ParseBlockchainError(pub String);

impl FromStr for Blockchain {
    type Err = ParseBlockchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if let Ok(coin) = name.parse::<Coin>() {
            return Ok(coin.into());
        }
        match name.as_str() {
            "bitcoin cash" => Ok(Self::Bch),
            "bitcoin sv" => Ok(Self::Bsv),
            "eth" | "ethereum" => Ok(Self::Eth),
            "eos" => Ok(Self::Eos),
            "xrp" | "ripple" => Ok(Self::Xrp),
            _ => Err(ParseBlockchainError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ticker_and_name() {
        for chain in Blockchain::ALL {
            assert_eq!(chain.ticker().parse::<Blockchain>().unwrap(), chain);
            assert_eq!(chain.name().parse::<Blockchain>().unwrap(), chain);
            assert_eq!(chain.to_string().to_lowercase().parse::<Blockchain>().unwrap(), chain);
        }
        assert!("solana".parse::<Blockchain>().is_err());
    }

    #[test]
    fn test_coin_types() {
        let expected = [0, 2, 145, 236, 3, 5, 6, 60, 194, 144];
        for (chain, ct) in Blockchain::ALL.into_iter().zip(expected) {
            assert_eq!(chain.coin_type(Network::Mainnet), ct, "{chain}");
        }
        assert_eq!(Blockchain::Doge.coin_type(Network::Testnet), 1);
    }

    #[test]
    fn test_network_support() {
        assert!(Blockchain::Ltc.supports(Network::Testnet));
        assert!(!Blockchain::Eth.supports(Network::Testnet));
        assert!(Blockchain::Xrp.supports(Network::Mainnet));
    }
}
