//! # Passphrase Protection
//!
//! Seeds at rest are encrypted under a key stretched from the user's
//! passphrase:
//!
//! ```text
//! key        = Argon2id(passphrase, salt; t=2, m=64 MiB, p=1) -> 32 bytes
//! encrypted  = hex( AES-256-GCM(key, seed) )     // nonce embedded up front
//! ```
//!
//! A second, independent path stores an Argon2 PHC string so a passphrase
//! can be checked without touching the encrypted seed.
//!
//! Salts and ciphertexts travel as lowercase hex so they drop straight into
//! JSON.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use super::encryption::{self, EncryptionError};
use super::keys::KeyError;
use crate::config::{
    AES_KEY_LENGTH, KDF_MEM_LIMIT_KIB, KDF_OPS_LIMIT, KDF_PARALLELISM, KEY_LENGTH, SALT_LENGTH,
};

fn argon2() -> Result<Argon2<'static>, KeyError> {
    let params = Params::new(
        KDF_MEM_LIMIT_KIB,
        KDF_OPS_LIMIT,
        KDF_PARALLELISM,
        Some(AES_KEY_LENGTH),
    )
    .map_err(|e| KeyError::HashingFailed(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 16 random bytes, hex encoded.
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    hex::encode(salt)
}

/// Stretch `passphrase` into a 32-byte cipher key.
pub fn derive_key(passphrase: &str, salt_hex: &str) -> Result<[u8; AES_KEY_LENGTH], KeyError> {
    let salt = hex::decode(salt_hex)
        .map_err(|e| KeyError::DecodingFailed(format!("salt: {e}")))?;
    let mut key = [0u8; AES_KEY_LENGTH];
    argon2()?
        .hash_password_into(passphrase.as_bytes(), &salt, &mut key)
        .map_err(|e| KeyError::HashingFailed(e.to_string()))?;
    Ok(key)
}

/// Encrypt a seed under `passphrase`, returning hex.
pub fn encrypt_seed(
    passphrase: &str,
    salt_hex: &str,
    seed: &[u8; KEY_LENGTH],
) -> Result<String, KeyError> {
    let key = derive_key(passphrase, salt_hex)?;
    let sealed = encryption::seal(&key, seed)
        .map_err(|e| KeyError::EncodingFailed(e.to_string()))?;
    Ok(hex::encode(sealed))
}

/// Recover a seed encrypted by [`encrypt_seed`].
///
/// A wrong passphrase is [`KeyError::PassphraseIncorrect`]. Bad hex, a
/// truncated ciphertext or a plaintext that is not 32 bytes are
/// [`KeyError::DecodingFailed`].
pub fn decrypt_seed(
    passphrase: &str,
    salt_hex: &str,
    encrypted_hex: &str,
) -> Result<[u8; KEY_LENGTH], KeyError> {
    let sealed = hex::decode(encrypted_hex)
        .map_err(|e| KeyError::DecodingFailed(format!("encrypted seed: {e}")))?;
    let key = derive_key(passphrase, salt_hex)?;
    let plaintext = encryption::open(&key, &sealed).map_err(|e| match e {
        EncryptionError::AuthenticationFailed => KeyError::PassphraseIncorrect,
        other => KeyError::DecodingFailed(other.to_string()),
    })?;
    <[u8; KEY_LENGTH]>::try_from(plaintext.as_slice()).map_err(|_| {
        KeyError::DecodingFailed(format!(
            "decrypted seed is {} bytes, expected {KEY_LENGTH}",
            plaintext.len()
        ))
    })
}

/// Argon2id PHC string for `passphrase`, with its own random salt.
pub fn hash_passphrase(passphrase: &str) -> Result<String, KeyError> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(|e| KeyError::HashingFailed(e.to_string()))?;
    let hash = argon2()?
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| KeyError::HashingFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check `passphrase` against a PHC string from [`hash_passphrase`].
///
/// `Ok(false)` is a mismatch; `Err` means the stored hash itself is bad.
pub fn verify_passphrase(passphrase: &str, phc: &str) -> Result<bool, KeyError> {
    let parsed = PasswordHash::new(phc).map_err(|e| KeyError::DecodingFailed(e.to_string()))?;
    match Argon2::default().verify_password(passphrase.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(KeyError::HashingFailed(e.to_string())),
    }
}
