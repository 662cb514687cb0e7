//! Dispatch through `open` for every blockchain.

use meridian_keychain::chains::BitcoinKeychain;
use meridian_keychain::{
    open, AddressType, Blockchain, DerivationPath, Error, KeySource, Keychain, Network,
};

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn mnemonic() -> KeySource {
    KeySource::mnemonic(TEST_MNEMONIC, None)
}

fn verifier_key(chain: Blockchain, key: &meridian_keychain::DerivedKey) -> String {
    match chain {
        Blockchain::Eos | Blockchain::Xrp => key.public_key.clone(),
        _ => key.address.clone(),
    }
}

#[test]
fn keychain_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync + ?Sized>() {}
    assert_send_sync::<dyn Keychain>();
}

#[test]
fn every_chain_derives_and_signs() {
    for chain in Blockchain::ALL {
        let keychain = open(chain, Network::Mainnet, &mnemonic()).unwrap();
        assert_eq!(keychain.blockchain(), chain);
        assert!(!keychain.is_watch_only());

        let path = keychain.default_path(0, false, 0).unwrap();
        assert_eq!(path.to_u32_vec()[1], chain.coin_type(Network::Mainnet) | 0x8000_0000, "{chain}");
        let key = keychain.derive(&path).unwrap();
        assert!(key.private_key.is_some(), "{chain}");
        assert!(keychain.is_valid_address(&key.address), "{chain}: {}", key.address);

        let sig = keychain.sign_message(&path, b"meridian").unwrap();
        let public = verifier_key(chain, &key);
        assert!(keychain.verify_message(&public, b"meridian", &sig).unwrap(), "{chain}");
        assert!(!keychain.verify_message(&public, b"other", &sig).unwrap_or(false), "{chain}");

        let digest = [0x42u8; 32];
        let sig = keychain.sign_digest(&path, &digest).unwrap();
        assert!(keychain.verify_digest(&key.public_key, &digest, &sig).unwrap(), "{chain}");
    }
}

#[test]
fn golden_addresses() {
    let btc = open(Blockchain::Btc, Network::Mainnet, &mnemonic()).unwrap();
    let path = btc.default_path(0, false, 0).unwrap();
    assert_eq!(path.to_string(), "m/84'/0'/0'/0/0");
    assert_eq!(btc.derive(&path).unwrap().address, "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");

    let legacy = BitcoinKeychain::open(
        meridian_btc::Coin::Bitcoin,
        Network::Mainnet,
        &mnemonic(),
        AddressType::P2pkh,
    )
    .unwrap();
    let path = legacy.default_path(0, false, 0).unwrap();
    assert_eq!(legacy.derive(&path).unwrap().address, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");

    let eth = open(Blockchain::Eth, Network::Mainnet, &mnemonic()).unwrap();
    let path = eth.default_path(0, false, 0).unwrap();
    assert_eq!(eth.derive(&path).unwrap().address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
}

#[test]
fn testnet_only_for_bitcoin_family() {
    for chain in [Blockchain::Eth, Blockchain::Eos, Blockchain::Xrp] {
        assert!(matches!(
            open(chain, Network::Testnet, &mnemonic()),
            Err(Error::UnsupportedNetwork { .. })
        ));
    }
    let btc = open(Blockchain::Btc, Network::Testnet, &mnemonic()).unwrap();
    assert_eq!(btc.network(), Network::Testnet);
    let key = btc.derive(&btc.default_path(0, false, 0).unwrap()).unwrap();
    assert!(key.address.starts_with("tb1q"));
}

#[test]
fn seed_source_matches_mnemonic() {
    let wallet = meridian::Wallet::from_mnemonic(TEST_MNEMONIC, None).unwrap();
    let seed = KeySource::seed(wallet.seed().to_vec());
    for chain in Blockchain::ALL {
        let a = open(chain, Network::Mainnet, &mnemonic()).unwrap();
        let b = open(chain, Network::Mainnet, &seed).unwrap();
        let path = a.default_path(0, true, 3).unwrap();
        assert_eq!(a.derive(&path).unwrap().address, b.derive(&path).unwrap().address, "{chain}");
    }
}

#[test]
fn account_xpub_gives_watch_only_keychain() {
    for chain in [Blockchain::Ltc, Blockchain::Doge, Blockchain::Eth, Blockchain::Xrp, Blockchain::Eos] {
        let full = open(chain, Network::Mainnet, &mnemonic()).unwrap();
        let path = full.default_path(0, false, 5).unwrap();
        let account = DerivationPath::new(path.indices()[..3].to_vec());
        let xpub = full.extended_public_key(&account).unwrap();

        let watch = open(chain, Network::Mainnet, &KeySource::xpub(xpub)).unwrap();
        assert!(watch.is_watch_only());
        let watch_path = watch.default_path(0, false, 5).unwrap();
        assert_eq!(watch_path.to_string(), "m/0/5");

        let watched = watch.derive(&watch_path).unwrap();
        assert_eq!(watched.address, full.derive(&path).unwrap().address, "{chain}");
        assert!(watched.private_key.is_none());
        assert!(watch.sign_message(&watch_path, b"x").is_err());
        assert!(watch.extended_private_key(&DerivationPath::master()).is_err());
    }
}

#[test]
fn xprv_source_round_trips() {
    let full = open(Blockchain::Dash, Network::Mainnet, &mnemonic()).unwrap();
    let xprv = full.extended_private_key(&DerivationPath::master()).unwrap();
    let imported = open(Blockchain::Dash, Network::Mainnet, &KeySource::xprv(xprv.as_str())).unwrap();
    let path = full.default_path(1, false, 0).unwrap();
    assert_eq!(
        imported.derive(&path).unwrap().private_key,
        full.derive(&path).unwrap().private_key
    );
}

#[test]
fn unsupported_address_type_is_rejected() {
    let result = BitcoinKeychain::open(
        meridian_btc::Coin::Dogecoin,
        Network::Mainnet,
        &mnemonic(),
        AddressType::P2wpkh,
    );
    assert!(matches!(
        result,
        Err(Error::Btc(meridian_btc::Error::UnsupportedAddressType { .. }))
    ));
}

#[test]
fn derive_many_is_sequential() {
    let xrp = open(Blockchain::Xrp, Network::Mainnet, &mnemonic()).unwrap();
    let keys = xrp.derive_many(0, false, 10, 3).unwrap();
    let indices: Vec<String> = keys.iter().map(|k| k.path.to_string()).collect();
    assert_eq!(indices, ["m/44'/144'/0'/0/10", "m/44'/144'/0'/0/11", "m/44'/144'/0'/0/12"]);
}

#[test]
fn free_verification_matches_keychain() {
    for chain in Blockchain::ALL {
        let keychain = open(chain, Network::Mainnet, &mnemonic()).unwrap();
        let path = keychain.default_path(0, false, 1).unwrap();
        let key = keychain.derive(&path).unwrap();

        let sig = keychain.sign_message(&path, b"detached").unwrap();
        let public = verifier_key(chain, &key);
        assert!(meridian_keychain::verify_message(chain, Network::Mainnet, &public, b"detached", &sig).unwrap());

        let sig = keychain.sign_digest(&path, &[9u8; 32]).unwrap();
        assert!(meridian_keychain::verify_digest(chain, Network::Mainnet, &key.public_key, &[9u8; 32], &sig).unwrap());
    }
    assert!(matches!(
        meridian_keychain::verify_digest(Blockchain::Xrp, Network::Testnet, "00", &[0u8; 32], "00"),
        Err(Error::UnsupportedNetwork { .. })
    ));
}
