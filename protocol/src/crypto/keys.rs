//! # Key Management
//!
//! Ed25519 keypairs for ledger accounts.
//!
//! A keypair is fully determined by its 32-byte seed. The seed travels as an
//! `S...` StrKey and the public half as a `G...` account id; see
//! [`strkey`](super::strkey).
//!
//! Key bytes are never logged. `Debug` shows the account id only.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use super::strkey::{self, StrKeyError, VersionByte};
use crate::config::{KEY_LENGTH, SIGNATURE_HINT_LENGTH};
use crate::types::PublicKey;

/// Failures while encoding, decoding or unlocking key material.
///
/// `PassphraseIncorrect` is kept apart from `DecodingFailed` so callers can
/// re-prompt for a passphrase without mistaking corrupt storage for a typo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("key encoding failed: {0}")]
    EncodingFailed(String),

    #[error("key decoding failed: {0}")]
    DecodingFailed(String),

    #[error("key derivation failed: {0}")]
    HashingFailed(String),

    #[error("passphrase incorrect")]
    PassphraseIncorrect,

    #[error("invalid strkey: {0}")]
    StrKey(#[from] StrKeyError),
}

/// An account's signing keypair.
///
/// Deliberately not `Serialize`: persisting a seed goes through
/// [`passphrase::encrypt_seed`](super::passphrase::encrypt_seed).
///
/// ```
/// use stellar_kit::crypto::Keypair;
///
/// let kp = Keypair::generate();
/// let sig = kp.sign(b"hello");
/// assert!(kp.verify(b"hello", &sig));
/// assert!(kp.account_id().starts_with('G'));
/// ```
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_seed(seed: &[u8; KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse an `S...` secret seed.
    pub fn from_secret_seed(secret_seed: &str) -> Result<Self, KeyError> {
        let seed = strkey::decode(VersionByte::Seed, secret_seed)?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_bytes(self.signing_key.verifying_key().to_bytes())
    }

    /// The raw 32-byte seed. Handle with care.
    pub fn seed(&self) -> [u8; KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Fallible signing, for callers that surface signer errors.
    pub fn try_sign(&self, message: &[u8]) -> Result<[u8; 64], ed25519_dalek::SignatureError> {
        self.signing_key.try_sign(message).map(|sig| sig.to_bytes())
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        verify_signature(&self.public_key(), message, signature)
    }

    /// Last four bytes of the public key.
    pub fn signature_hint(&self) -> [u8; SIGNATURE_HINT_LENGTH] {
        self.public_key().signature_hint()
    }

    /// The `G...` account id.
    pub fn account_id(&self) -> String {
        self.public_key().account_id()
    }

    /// The `S...` secret seed.
    pub fn secret_seed(&self) -> String {
        strkey::encode(VersionByte::Seed, &self.seed())
    }
}

/// Check an Ed25519 `signature` over `message` against `public_key`.
///
/// Returns `false` rather than an error for malformed keys or signatures
/// of the wrong length.
pub fn verify_signature(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    verifying_key.verify(message, &signature).is_ok()
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.seed())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", self.account_id())
    }
}

/// Keypairs compare by public key; seeds are never compared directly.
impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for Keypair {}
