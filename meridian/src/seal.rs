//! Password-based sealed boxes.
//!
//! A sealed box is `base64(header || ciphertext)` where the header carries
//! everything needed to reopen it except the password:
//!
//! ```text
//! version(1) | memory_kib(4, BE) | iterations(4, BE) | lanes(4, BE) | salt(16) | nonce(12)
//! ```
//!
//! The key is derived with Argon2id from the password and a random salt, and
//! the payload is encrypted with AES-256-GCM using the header as associated
//! data, so any change to the parameters is caught at authentication time.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Current sealed box format version.
const SEAL_VERSION: u8 = 1;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const HEADER_LEN: usize = 1 + 4 + 4 + 4 + SALT_LEN + NONCE_LEN;
/// GCM authentication tag length.
const TAG_LEN: usize = 16;
/// Upper bound on memory cost (1 GiB).
const MAX_MEMORY_KIB: u32 = 1024 * 1024;
/// Upper bound on Argon2 passes.
const MAX_ITERATIONS: u32 = 16;
/// Upper bound on Argon2 lanes.
const MAX_LANES: u32 = 16;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub lanes: u32,
}

impl SealParams {
    /// Whether every cost is within the limits accepted by [`open`].
    #[must_use]
    pub const fn within_limits(&self) -> bool {
        self.memory_kib <= MAX_MEMORY_KIB
            && self.iterations <= MAX_ITERATIONS
            && self.lanes <= MAX_LANES
    }
}

impl Default for SealParams {
    /// 64 MiB, 3 passes, 4 lanes.
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            lanes: 4,
        }
    }
}

/// Seal `plaintext` under `password` with the default Argon2id parameters.
///
/// # Errors
///
/// Returns [`Error::EmptyPassword`] for an empty password.
pub fn seal(plaintext: &[u8], password: &str) -> Result<String> {
    seal_with(SealParams::default(), plaintext, password)
}

/// Seal `plaintext` under `password` with explicit Argon2id parameters.
///
/// # Errors
///
/// Returns [`Error::EmptyPassword`] for an empty password and
/// [`Error::KeyDerivation`] if the parameters are rejected by Argon2 or are
/// above the limits [`open`] enforces.
pub fn seal_with(params: SealParams, plaintext: &[u8], password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }
    if !params.within_limits() {
        return Err(Error::KeyDerivation);
    }

    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut nonce);

    let mut header = Vec::with_capacity(HEADER_LEN);
    header.push(SEAL_VERSION);
    header.extend_from_slice(&params.memory_kib.to_be_bytes());
    header.extend_from_slice(&params.iterations.to_be_bytes());
    header.extend_from_slice(&params.lanes.to_be_bytes());
    header.extend_from_slice(&salt);
    header.extend_from_slice(&nonce);

    let key = derive_key(password, &salt, params)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_slice()).map_err(|_| Error::KeyDerivation)?;
    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce),
            Payload {
                msg: plaintext,
                aad: &header,
            },
        )
        .map_err(|_| Error::KeyDerivation)?;

    let mut sealed = header;
    sealed.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(sealed))
}

/// Open a sealed box produced by [`seal`] or [`seal_with`].
///
/// # Errors
///
/// - [`Error::EmptyPassword`] for an empty password.
/// - [`Error::InvalidSealedBox`] if the box is not base64, is truncated, has an
///   unknown version or out-of-range parameters.
/// - [`Error::Decryption`] if the password is wrong or the data was altered.
pub fn open(sealed: &str, password: &str) -> Result<Zeroizing<Vec<u8>>> {
    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }

    let raw = STANDARD
        .decode(sealed.trim())
        .map_err(|_| Error::InvalidSealedBox)?;
    if raw.len() < HEADER_LEN + TAG_LEN || raw[0] != SEAL_VERSION {
        return Err(Error::InvalidSealedBox);
    }

    let (header, ciphertext) = raw.split_at(HEADER_LEN);
    let params = SealParams {
        memory_kib: read_u32(&header[1..5]),
        iterations: read_u32(&header[5..9]),
        lanes: read_u32(&header[9..13]),
    };
    if !params.within_limits() {
        return Err(Error::InvalidSealedBox);
    }
    let salt = &header[13..13 + SALT_LEN];
    let nonce = &header[13 + SALT_LEN..];

    let key = derive_key(password, salt, params).map_err(|_| Error::InvalidSealedBox)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_slice()).map_err(|_| Error::KeyDerivation)?;
    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: header,
            },
        )
        .map_err(|_| Error::Decryption)?;

    Ok(Zeroizing::new(plaintext))
}

fn derive_key(password: &str, salt: &[u8], params: SealParams) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let argon_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.lanes,
        Some(KEY_LEN),
    )
    .map_err(|_| Error::KeyDerivation)?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon
        .hash_password_into(password.as_bytes(), salt, key.as_mut_slice())
        .map_err(|_| Error::KeyDerivation)?;
    Ok(key)
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_be_bytes(buf)
}
