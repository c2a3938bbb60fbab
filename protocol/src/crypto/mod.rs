//! # Key Encoding & Derivation
//!
//! Everything that touches key material: Ed25519 keypairs, the StrKey text
//! form, SHA-256 and the passphrase layer that protects seeds at rest.
//!
//! All of it wraps audited crates (`ed25519-dalek`, `sha2`, `argon2`,
//! `aes-gcm`). The only hand-written primitive is the CRC-16 in
//! [`strkey`], which is a checksum, not cryptography.

pub mod encryption;
pub mod hash;
pub mod keys;
pub mod passphrase;
pub mod strkey;

pub use hash::{network_id, sha256};
pub use keys::{verify_signature, KeyError, Keypair};
pub use passphrase::{
    decrypt_seed, derive_key, encrypt_seed, generate_salt, hash_passphrase, verify_passphrase,
};
pub use strkey::{StrKeyError, VersionByte};
