//! Signature verification without key material.

use bitcoin::secp256k1::Secp256k1;
use tracing::debug;

use crate::chains::check_network;
use crate::{Blockchain, Network, Result};

/// Verify a message signature produced by [`Keychain::sign_message`].
///
/// `public` is what [`Keychain::verify_message`] takes for the chain.
///
/// # Errors
///
/// Returns an error if `public` or `signature` is malformed.
///
/// [`Keychain::sign_message`]: crate::Keychain::sign_message
/// [`Keychain::verify_message`]: crate::Keychain::verify_message
pub fn verify_message(
    blockchain: Blockchain,
    network: Network,
    public: &str,
    message: &[u8],
    signature: &str,
) -> Result<bool> {
    check_network(blockchain, network)?;
    debug!(chain = %blockchain, %network, "verify message");
    let secp = Secp256k1::verification_only();
    Ok(match blockchain.coin() {
        Some(coin) => {
            meridian_btc::message::verify_message(&secp, coin.params(network), public, message, signature)?
        }
        None => match blockchain {
            Blockchain::Eth => meridian_eth::eip191::verify_message(public, message, signature)?,
            Blockchain::Eos => meridian_eos::signature::verify_message(&secp, public, message, signature)?,
            _ => meridian_xrp::signing::verify_message(public, message, signature)?,
        },
    })
}

/// Verify a digest signature produced by [`Keychain::sign_digest`] against
/// a public key.
///
/// # Errors
///
/// Returns an error if `public` or `signature` is malformed.
///
/// [`Keychain::sign_digest`]: crate::Keychain::sign_digest
pub fn verify_digest(
    blockchain: Blockchain,
    network: Network,
    public: &str,
    digest: &[u8; 32],
    signature: &str,
) -> Result<bool> {
    check_network(blockchain, network)?;
    debug!(chain = %blockchain, %network, "verify digest");
    let secp = Secp256k1::verification_only();
    Ok(match blockchain.coin() {
        Some(_) => meridian_btc::message::verify_digest(&secp, public, digest, signature)?,
        None => match blockchain {
            Blockchain::Eth => meridian_eth::eip191::verify_digest(public, digest, signature)?,
            Blockchain::Eos => meridian_eos::signature::verify_digest(&secp, public, digest, signature)?,
            _ => meridian_xrp::signing::verify_digest(public, digest, signature)?,
        },
    })
}
