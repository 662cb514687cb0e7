//! Key and signature formats across the public API.

use meridian::{DerivationPath, Wallet};
use meridian_eos::{Deriver, Error, PrivateKey, PublicKey, Signature};

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const DEV_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
const DEV_PUBLIC: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

fn deriver() -> Deriver {
    Deriver::new(&Wallet::from_mnemonic(TEST_MNEMONIC, None).unwrap()).unwrap()
}

#[test]
fn dev_key_formats_agree() {
    let private: PrivateKey = DEV_WIF.parse().unwrap();
    let k1: PrivateKey = private.to_k1_string().parse().unwrap();
    assert_eq!(k1.to_wif().as_str(), DEV_WIF);

    let public: PublicKey = DEV_PUBLIC.parse().unwrap();
    let from_k1: PublicKey = public.to_k1_string().parse().unwrap();
    assert_eq!(from_k1.to_string(), DEV_PUBLIC);
}

#[test]
fn root_xprv_import_matches_seed() {
    let seeded = deriver();
    let root = seeded.extended_private_key(&DerivationPath::master()).unwrap();
    let imported = Deriver::from_xprv(&root).unwrap();
    for index in 0..3 {
        assert_eq!(
            seeded.derive(0, false, index).unwrap().public_key,
            imported.derive(0, false, index).unwrap().public_key
        );
    }
}

#[test]
fn signature_text_round_trips() {
    let deriver = deriver();
    let key = deriver.derive(0, false, 0).unwrap();
    let text = deriver.sign_digest(&key.path, &[7u8; 32]).unwrap();

    let signature: Signature = text.parse().unwrap();
    assert!(signature.is_canonical());
    assert_eq!(signature.to_string(), text);
    assert!(deriver.verify_digest(&key.public_key_k1, &[7u8; 32], &text).unwrap());
    assert!(!deriver.verify_digest(&key.public_key, &[8u8; 32], &text).unwrap());
}

#[test]
fn corrupted_signature_is_rejected() {
    let deriver = deriver();
    let key = deriver.derive(0, false, 0).unwrap();
    let mut text = deriver.sign_message(&key.path, b"vote").unwrap();
    let last = text.pop().unwrap();
    text.push(if last == 'a' { 'b' } else { 'a' });
    assert!(matches!(text.parse::<Signature>(), Err(Error::InvalidSignature(_))));
}
