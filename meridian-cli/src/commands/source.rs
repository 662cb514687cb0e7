//! Arguments shared by the key-holding commands.

use clap::Args;
use meridian::encoding::decode_hex;
use meridian_keychain::chains::BitcoinKeychain;
use meridian_keychain::{open, AddressType, Blockchain, KeySource, Keychain, Network};
use zeroize::Zeroizing;

/// Target blockchain and network.
#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Blockchain ticker or name (btc, ltc, bch, bsv, doge, dash, emc, eth, eos, xrp).
    #[arg(short, long)]
    pub chain: Blockchain,

    /// Use testnet parameters (Bitcoin family only).
    #[arg(short, long)]
    pub testnet: bool,

    /// Address type for Bitcoin-family chains (legacy, segwit, native-segwit, taproot, cashaddr).
    #[arg(short, long)]
    pub address_type: Option<AddressType>,
}

impl ChainArgs {
    /// Selected network.
    pub const fn network(&self) -> Network {
        if self.testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    /// Open a keychain over `source`.
    pub fn open(&self, source: &KeySource) -> Result<Box<dyn Keychain>, Box<dyn std::error::Error>> {
        match (self.address_type, self.chain.coin()) {
            (None, _) => Ok(open(self.chain, self.network(), source)?),
            (Some(address_type), Some(coin)) => Ok(Box::new(BitcoinKeychain::open(
                coin,
                self.network(),
                source,
                address_type,
            )?)),
            (Some(_), None) => {
                Err(format!("--address-type applies only to Bitcoin-family chains, not {}", self.chain).into())
            }
        }
    }
}

/// Root key material. Exactly one of the flags is used; the mnemonic may
/// also come from the environment.
#[derive(Args)]
pub struct SourceArgs {
    /// BIP-39 mnemonic phrase.
    #[arg(short, long, env = "MERIDIAN_MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// BIP-39 passphrase.
    #[arg(short, long, env = "MERIDIAN_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Hex-encoded BIP-32 seed.
    #[arg(long, group = "root")]
    pub seed: Option<String>,

    /// Extended private key.
    #[arg(long, group = "root")]
    pub xprv: Option<String>,

    /// Extended public key (watch-only).
    #[arg(long, group = "root")]
    pub xpub: Option<String>,
}

impl SourceArgs {
    /// Resolve the key source. `--seed`, `--xprv` and `--xpub` take precedence
    /// over a mnemonic, which may be set in the environment.
    pub fn key_source(&self) -> Result<KeySource, Box<dyn std::error::Error>> {
        if let Some(seed) = &self.seed {
            return Ok(KeySource::Seed(Zeroizing::new(decode_hex(seed)?)));
        }
        if let Some(xprv) = &self.xprv {
            return Ok(KeySource::xprv(xprv.as_str()));
        }
        if let Some(xpub) = &self.xpub {
            return Ok(KeySource::xpub(xpub.as_str()));
        }
        match &self.mnemonic {
            Some(phrase) => Ok(KeySource::mnemonic(phrase.as_str(), self.passphrase.as_deref())),
            None => Err("no key source: pass --mnemonic, --seed, --xprv or --xpub (or set MERIDIAN_MNEMONIC)".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(seed: Option<&str>, xpub: Option<&str>, mnemonic: Option<&str>) -> SourceArgs {
        SourceArgs {
            mnemonic: mnemonic.map(str::to_owned),
            passphrase: None,
            seed: seed.map(str::to_owned),
            xprv: None,
            xpub: xpub.map(str::to_owned),
        }
    }

    #[test]
    fn test_explicit_root_beats_mnemonic() {
        let resolved = source(None, Some("xpub1"), Some("abandon")).key_source().unwrap();
        assert!(matches!(resolved, KeySource::ExtendedPublicKey(ref k) if k == "xpub1"));

        let resolved = source(Some("0x0102"), None, Some("abandon")).key_source().unwrap();
        assert!(matches!(resolved, KeySource::Seed(ref s) if s.as_slice() == [1, 2]));
    }

    #[test]
    fn test_missing_source() {
        assert!(source(None, None, None).key_source().is_err());
    }

    #[test]
    fn test_address_type_only_for_bitcoin_family() {
        let args = ChainArgs {
            chain: Blockchain::Eth,
            testnet: false,
            address_type: Some(AddressType::P2pkh),
        };
        assert!(args.open(&KeySource::seed([1u8; 32])).is_err());
    }
}
