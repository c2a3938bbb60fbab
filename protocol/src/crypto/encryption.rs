//! # AES-256-GCM
//!
//! Authenticated encryption for secret seeds at rest.
//!
//! Output format is `nonce:12 | ciphertext | tag:16`. Nonces are random
//! 96-bit values from the OS RNG; every key in this crate comes from a
//! salted KDF and encrypts a handful of messages, far below the birthday
//! bound.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use thiserror::Error;

use crate::config::{AES_KEY_LENGTH, AES_NONCE_LENGTH, AES_TAG_LENGTH};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptionError {
    #[error("encryption failed")]
    EncryptFailed,

    /// Wrong key or tampered ciphertext. The two are indistinguishable.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("ciphertext too short: {0} bytes, need at least {min}", min = AES_NONCE_LENGTH + AES_TAG_LENGTH)]
    CiphertextTooShort(usize),
}

/// Encrypt `plaintext` under `key` with a fresh random nonce.
///
/// ```
/// use stellar_kit::crypto::encryption::{open, seal};
///
/// let key = [7u8; 32];
/// let sealed = seal(&key, b"seed bytes").unwrap();
/// assert_eq!(open(&key, &sealed).unwrap(), b"seed bytes");
/// ```
pub fn seal(key: &[u8; AES_KEY_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::EncryptFailed)?;

    let mut nonce_bytes = [0u8; AES_NONCE_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| EncryptionError::EncryptFailed)?;

    let mut out = Vec::with_capacity(AES_NONCE_LENGTH + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Reverse [`seal`].
pub fn open(key: &[u8; AES_KEY_LENGTH], sealed: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    if sealed.len() < AES_NONCE_LENGTH + AES_TAG_LENGTH {
        return Err(EncryptionError::CiphertextTooShort(sealed.len()));
    }
    let (nonce, ciphertext) = sealed.split_at(AES_NONCE_LENGTH);
    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::AuthenticationFailed)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| EncryptionError::AuthenticationFailed)
}
