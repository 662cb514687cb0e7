//! Bitcoin-family coins, networks and their parameter records.

use core::fmt;
use core::str::FromStr;

use bitcoin::NetworkKind;

use crate::AddressType;

/// Supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network.
    Testnet,
}

impl Network {
    /// Convert to the bitcoin crate's network kind (selects BIP32 version bytes).
    #[inline]
    #[must_use]
    pub const fn to_network_kind(self) -> NetworkKind {
        match self {
            Self::Mainnet => NetworkKind::Main,
            Self::Testnet => NetworkKind::Test,
        }
    }

    /// Get network name as string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown network name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid network, expected: mainnet or testnet")]
pub struct ParseNetworkError;

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(ParseNetworkError),
        }
    }
}

/// Bitcoin-family coins sharing secp256k1 keys, Base58Check and BIP32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coin {
    /// Bitcoin (BTC).
    Bitcoin,
    /// Litecoin (LTC).
    Litecoin,
    /// Bitcoin Cash (BCH).
    BitcoinCash,
    /// Bitcoin SV (BSV).
    BitcoinSv,
    /// Dogecoin (DOGE).
    Dogecoin,
    /// Dash (DASH).
    Dash,
    /// Emercoin (EMC).
    Emercoin,
}

impl Coin {
    /// Every supported coin.
    pub const ALL: [Self; 7] = [
        Self::Bitcoin,
        Self::Litecoin,
        Self::BitcoinCash,
        Self::BitcoinSv,
        Self::Dogecoin,
        Self::Dash,
        Self::Emercoin,
    ];

    /// Ticker symbol.
    #[must_use]
    pub const fn ticker(self) -> &'static str {
        match self {
            Self::Bitcoin => "BTC",
            Self::Litecoin => "LTC",
            Self::BitcoinCash => "BCH",
            Self::BitcoinSv => "BSV",
            Self::Dogecoin => "DOGE",
            Self::Dash => "DASH",
            Self::Emercoin => "EMC",
        }
    }

    /// Address type used when the caller does not pick one.
    #[must_use]
    pub const fn default_address_type(self) -> AddressType {
        match self {
            Self::Bitcoin | Self::Litecoin => AddressType::P2wpkh,
            Self::BitcoinCash => AddressType::CashAddr,
            Self::BitcoinSv | Self::Dogecoin | Self::Dash | Self::Emercoin => AddressType::P2pkh,
        }
    }

    /// Parameter record for this coin on `network`.
    #[must_use]
    pub const fn params(self, network: Network) -> &'static ChainParams {
        ChainParams::get(self, network)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

/// Error returned when parsing an unknown coin name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid coin, expected one of: btc, ltc, bch, bsv, doge, dash, emc")]
pub struct ParseCoinError;

impl FromStr for Coin {
    type Err = ParseCoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "btc" | "bitcoin" => Ok(Self::Bitcoin),
            "ltc" | "litecoin" => Ok(Self::Litecoin),
            "bch" | "bitcoincash" | "bitcoin-cash" => Ok(Self::BitcoinCash),
            "bsv" | "bitcoinsv" | "bitcoin-sv" => Ok(Self::BitcoinSv),
            "doge" | "dogecoin" => Ok(Self::Dogecoin),
            "dash" => Ok(Self::Dash),
            "emc" | "emercoin" => Ok(Self::Emercoin),
            _ => Err(ParseCoinError),
        }
    }
}

/// Static network parameters for one coin on one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    /// Coin these parameters belong to.
    pub coin: Coin,
    /// Network these parameters belong to.
    pub network: Network,
    /// P2PKH address version byte.
    pub p2pkh_prefix: u8,
    /// P2SH address version byte.
    pub p2sh_prefix: u8,
    /// WIF private key version byte.
    pub wif_prefix: u8,
    /// Extended private key version bytes.
    pub xprv_version: [u8; 4],
    /// Extended public key version bytes.
    pub xpub_version: [u8; 4],
    /// Bech32 human-readable part, for coins with SegWit.
    pub bech32_hrp: Option<&'static str>,
    /// CashAddr prefix, for Bitcoin Cash.
    pub cashaddr_prefix: Option<&'static str>,
    /// BIP44 coin type.
    pub coin_type: u32,
    /// Prefix of the "Signed Message" digest.
    pub message_magic: &'static str,
}

const BTC_XPRV: [u8; 4] = [0x04, 0x88, 0xad, 0xe4];
const BTC_XPUB: [u8; 4] = [0x04, 0x88, 0xb2, 0x1e];
const TEST_XPRV: [u8; 4] = [0x04, 0x35, 0x83, 0x94];
const TEST_XPUB: [u8; 4] = [0x04, 0x35, 0x87, 0xcf];
const TESTNET_COIN_TYPE: u32 = 1;

const BITCOIN_MAGIC: &str = "Bitcoin Signed Message:\n";

macro_rules! params {
    (
        $coin:ident, $net:ident,
        p2pkh: $p2pkh:expr, p2sh: $p2sh:expr, wif: $wif:expr,
        xprv: $xprv:expr, xpub: $xpub:expr,
        bech32: $hrp:expr, cashaddr: $cash:expr,
        coin_type: $ct:expr, magic: $magic:expr $(,)?
    ) => {
        ChainParams {
            coin: Coin::$coin,
            network: Network::$net,
            p2pkh_prefix: $p2pkh,
            p2sh_prefix: $p2sh,
            wif_prefix: $wif,
            xprv_version: $xprv,
            xpub_version: $xpub,
            bech32_hrp: $hrp,
            cashaddr_prefix: $cash,
            coin_type: $ct,
            message_magic: $magic,
        }
    };
}

static BTC_MAIN: ChainParams = params!(Bitcoin, Mainnet,
    p2pkh: 0x00, p2sh: 0x05, wif: 0x80, xprv: BTC_XPRV, xpub: BTC_XPUB,
    bech32: Some("bc"), cashaddr: None, coin_type: 0, magic: BITCOIN_MAGIC);
static BTC_TEST: ChainParams = params!(Bitcoin, Testnet,
    p2pkh: 0x6f, p2sh: 0xc4, wif: 0xef, xprv: TEST_XPRV, xpub: TEST_XPUB,
    bech32: Some("tb"), cashaddr: None, coin_type: TESTNET_COIN_TYPE, magic: BITCOIN_MAGIC);

static LTC_MAIN: ChainParams = params!(Litecoin, Mainnet,
    p2pkh: 0x30, p2sh: 0x32, wif: 0xb0,
    xprv: [0x01, 0x9d, 0x9c, 0xfe], xpub: [0x01, 0x9d, 0xa4, 0x62],
    bech32: Some("ltc"), cashaddr: None, coin_type: 2, magic: "Litecoin Signed Message:\n");
static LTC_TEST: ChainParams = params!(Litecoin, Testnet,
    p2pkh: 0x6f, p2sh: 0x3a, wif: 0xef,
    xprv: [0x04, 0x36, 0xef, 0x7d], xpub: [0x04, 0x36, 0xf6, 0xe1],
    bech32: Some("tltc"), cashaddr: None, coin_type: TESTNET_COIN_TYPE,
    magic: "Litecoin Signed Message:\n");

static BCH_MAIN: ChainParams = params!(BitcoinCash, Mainnet,
    p2pkh: 0x00, p2sh: 0x05, wif: 0x80, xprv: BTC_XPRV, xpub: BTC_XPUB,
    bech32: None, cashaddr: Some("bitcoincash"), coin_type: 145, magic: BITCOIN_MAGIC);
static BCH_TEST: ChainParams = params!(BitcoinCash, Testnet,
    p2pkh: 0x6f, p2sh: 0xc4, wif: 0xef, xprv: TEST_XPRV, xpub: TEST_XPUB,
    bech32: None, cashaddr: Some("bchtest"), coin_type: TESTNET_COIN_TYPE, magic: BITCOIN_MAGIC);

static BSV_MAIN: ChainParams = params!(BitcoinSv, Mainnet,
    p2pkh: 0x00, p2sh: 0x05, wif: 0x80, xprv: BTC_XPRV, xpub: BTC_XPUB,
    bech32: None, cashaddr: None, coin_type: 236, magic: BITCOIN_MAGIC);
static BSV_TEST: ChainParams = params!(BitcoinSv, Testnet,
    p2pkh: 0x6f, p2sh: 0xc4, wif: 0xef, xprv: TEST_XPRV, xpub: TEST_XPUB,
    bech32: None, cashaddr: None, coin_type: TESTNET_COIN_TYPE, magic: BITCOIN_MAGIC);

static DOGE_MAIN: ChainParams = params!(Dogecoin, Mainnet,
    p2pkh: 0x1e, p2sh: 0x16, wif: 0x9e,
    xprv: [0x02, 0xfa, 0xc3, 0x98], xpub: [0x02, 0xfa, 0xca, 0xfd],
    bech32: None, cashaddr: None, coin_type: 3, magic: "Dogecoin Signed Message:\n");
static DOGE_TEST: ChainParams = params!(Dogecoin, Testnet,
    p2pkh: 0x71, p2sh: 0xc4, wif: 0xf1, xprv: TEST_XPRV, xpub: TEST_XPUB,
    bech32: None, cashaddr: None, coin_type: TESTNET_COIN_TYPE,
    magic: "Dogecoin Signed Message:\n");

static DASH_MAIN: ChainParams = params!(Dash, Mainnet,
    p2pkh: 0x4c, p2sh: 0x10, wif: 0xcc, xprv: BTC_XPRV, xpub: BTC_XPUB,
    bech32: None, cashaddr: None, coin_type: 5, magic: "DarkCoin Signed Message:\n");
static DASH_TEST: ChainParams = params!(Dash, Testnet,
    p2pkh: 0x8c, p2sh: 0x13, wif: 0xef, xprv: TEST_XPRV, xpub: TEST_XPUB,
    bech32: None, cashaddr: None, coin_type: TESTNET_COIN_TYPE,
    magic: "DarkCoin Signed Message:\n");

static EMC_MAIN: ChainParams = params!(Emercoin, Mainnet,
    p2pkh: 0x21, p2sh: 0x5c, wif: 0x80, xprv: BTC_XPRV, xpub: BTC_XPUB,
    bech32: None, cashaddr: None, coin_type: 6, magic: "Emercoin Signed Message:\n");
static EMC_TEST: ChainParams = params!(Emercoin, Testnet,
    p2pkh: 0x6f, p2sh: 0xc4, wif: 0xef, xprv: TEST_XPRV, xpub: TEST_XPUB,
    bech32: None, cashaddr: None, coin_type: TESTNET_COIN_TYPE,
    magic: "Emercoin Signed Message:\n");

impl ChainParams {
    /// Look up the parameter record for `coin` on `network`.
    #[must_use]
    pub const fn get(coin: Coin, network: Network) -> &'static Self {
        match (coin, network) {
            (Coin::Bitcoin, Network::Mainnet) => &BTC_MAIN,
            (Coin::Bitcoin, Network::Testnet) => &BTC_TEST,
            (Coin::Litecoin, Network::Mainnet) => &LTC_MAIN,
            (Coin::Litecoin, Network::Testnet) => &LTC_TEST,
            (Coin::BitcoinCash, Network::Mainnet) => &BCH_MAIN,
            (Coin::BitcoinCash, Network::Testnet) => &BCH_TEST,
            (Coin::BitcoinSv, Network::Mainnet) => &BSV_MAIN,
            (Coin::BitcoinSv, Network::Testnet) => &BSV_TEST,
            (Coin::Dogecoin, Network::Mainnet) => &DOGE_MAIN,
            (Coin::Dogecoin, Network::Testnet) => &DOGE_TEST,
            (Coin::Dash, Network::Mainnet) => &DASH_MAIN,
            (Coin::Dash, Network::Testnet) => &DASH_TEST,
            (Coin::Emercoin, Network::Mainnet) => &EMC_MAIN,
            (Coin::Emercoin, Network::Testnet) => &EMC_TEST,
        }
    }

    /// Version bytes the bitcoin crate expects for this network's xprv.
    pub(crate) const fn bitcoin_xprv_version(&self) -> [u8; 4] {
        match self.network {
            Network::Mainnet => BTC_XPRV,
            Network::Testnet => TEST_XPRV,
        }
    }

    /// Version bytes the bitcoin crate expects for this network's xpub.
    pub(crate) const fn bitcoin_xpub_version(&self) -> [u8; 4] {
        match self.network {
            Network::Mainnet => BTC_XPUB,
            Network::Testnet => TEST_XPUB,
        }
    }

    /// Whether `address_type` can be encoded for this coin.
    #[must_use]
    pub const fn supports(&self, address_type: AddressType) -> bool {
        match address_type {
            AddressType::P2pkh => true,
            AddressType::P2shP2wpkh | AddressType::P2wpkh => self.bech32_hrp.is_some(),
            AddressType::P2tr => matches!(self.coin, Coin::Bitcoin),
            AddressType::CashAddr => self.cashaddr_prefix.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_types() {
        let expected = [0, 2, 145, 236, 3, 5, 6];
        for (coin, ct) in Coin::ALL.iter().zip(expected) {
            assert_eq!(coin.params(Network::Mainnet).coin_type, ct, "{coin}");
            assert_eq!(coin.params(Network::Testnet).coin_type, 1, "{coin}");
        }
    }

    #[test]
    fn test_params_records_match_key() {
        for coin in Coin::ALL {
            for network in [Network::Mainnet, Network::Testnet] {
                let params = ChainParams::get(coin, network);
                assert_eq!(params.coin, coin);
                assert_eq!(params.network, network);
            }
        }
    }

    #[test]
    fn test_address_type_support() {
        let btc = Coin::Bitcoin.params(Network::Mainnet);
        assert!(btc.supports(AddressType::P2tr));
        assert!(!btc.supports(AddressType::CashAddr));

        let ltc = Coin::Litecoin.params(Network::Mainnet);
        assert!(ltc.supports(AddressType::P2wpkh));
        assert!(!ltc.supports(AddressType::P2tr));

        let bch = Coin::BitcoinCash.params(Network::Testnet);
        assert!(bch.supports(AddressType::CashAddr));
        assert!(!bch.supports(AddressType::P2wpkh));

        let doge = Coin::Dogecoin.params(Network::Mainnet);
        assert!(doge.supports(AddressType::P2pkh));
        assert!(!doge.supports(AddressType::P2shP2wpkh));
    }

    #[test]
    fn test_default_address_type_is_supported() {
        for coin in Coin::ALL {
            for network in [Network::Mainnet, Network::Testnet] {
                assert!(coin.params(network).supports(coin.default_address_type()));
            }
        }
    }

    #[test]
    fn test_coin_from_str() {
        assert_eq!("BTC".parse::<Coin>().unwrap(), Coin::Bitcoin);
        assert_eq!("litecoin".parse::<Coin>().unwrap(), Coin::Litecoin);
        assert_eq!("bitcoin-cash".parse::<Coin>().unwrap(), Coin::BitcoinCash);
        assert_eq!("emc".parse::<Coin>().unwrap(), Coin::Emercoin);
        assert!("eth".parse::<Coin>().is_err());
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("Mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("test".parse::<Network>().unwrap(), Network::Testnet);
        assert!("regtest".parse::<Network>().is_err());
    }
}
