//! Golden vectors for the standard BIP-39 test mnemonic.

use meridian::{DerivationPath, Wallet};
use meridian_eth::{DerivationStyle, Deriver};

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const ROOT_XPRV: &str = "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu";

#[test]
fn first_address_and_root() {
    let wallet = Wallet::from_mnemonic(TEST_MNEMONIC, None).unwrap();
    let deriver = Deriver::new(&wallet).unwrap();

    assert_eq!(
        deriver.derive(0, false, 0).unwrap().address,
        "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
    );
    assert_eq!(
        deriver.extended_private_key(&DerivationPath::master()).unwrap().as_str(),
        ROOT_XPRV
    );
}

#[test]
fn root_xprv_import_matches_seed() {
    let from_seed = Deriver::new(&Wallet::from_mnemonic(TEST_MNEMONIC, None).unwrap()).unwrap();
    let from_xprv = Deriver::from_xprv(ROOT_XPRV).unwrap();
    for style in DerivationStyle::ALL {
        assert_eq!(
            from_seed.derive_with_style(style, 2).unwrap().address,
            from_xprv.derive_with_style(style, 2).unwrap().address,
            "{style}"
        );
    }
}
