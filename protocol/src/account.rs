//! # Accounts
//!
//! An account as a wallet holds it: a public account id plus a seed that is
//! only ever stored encrypted. Unlocking takes the passphrase every time;
//! nothing here caches a decrypted seed.
//!
//! [`ProtectedAccount`] is `serde`-serializable so callers can persist it
//! however they like. This crate never writes it anywhere.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::KEY_LENGTH;
use crate::crypto::{self, Keypair};
use crate::error::Error;
use crate::types::PublicKey;

/// Anything that can name a signing account and, given the passphrase,
/// produce its seed.
pub trait Account: Send + Sync {
    /// The `G...` account id, if the account has one yet.
    fn public_key(&self) -> Option<String>;

    /// Decrypt the account's seed.
    fn secret_seed(&self, passphrase: &str) -> Result<[u8; KEY_LENGTH], Error>;

    /// Unlock the signing keypair.
    ///
    /// Fails with [`Error::MissingPublicKey`] when the account has no id and
    /// [`Error::MissingSecretKey`] when the decrypted seed does not belong to
    /// that id.
    fn keypair(&self, passphrase: &str) -> Result<Keypair, Error> {
        let account_id = self.public_key().ok_or(Error::MissingPublicKey)?;
        let expected = PublicKey::from_account_id(&account_id)?;
        let keypair = Keypair::from_seed(&self.secret_seed(passphrase)?);
        if keypair.public_key() != expected {
            return Err(Error::MissingSecretKey);
        }
        Ok(keypair)
    }
}

/// An account whose seed is encrypted under a passphrase.
///
/// `salt` and `encrypted_seed` are hex; `passphrase_hash` is an Argon2 PHC
/// string usable to check a passphrase without decrypting anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedAccount {
    pub account_id: String,
    pub passphrase_hash: String,
    pub salt: String,
    pub encrypted_seed: String,
}

impl ProtectedAccount {
    /// Generate a new keypair and protect its seed with `passphrase`.
    pub fn create(passphrase: &str) -> Result<Self, Error> {
        Self::protect(&Keypair::generate(), passphrase)
    }

    /// Protect an existing keypair's seed with `passphrase`.
    pub fn protect(keypair: &Keypair, passphrase: &str) -> Result<Self, Error> {
        let salt = crypto::generate_salt();
        let account = Self {
            account_id: keypair.account_id(),
            passphrase_hash: crypto::hash_passphrase(passphrase)?,
            encrypted_seed: crypto::encrypt_seed(passphrase, &salt, &keypair.seed())?,
            salt,
        };
        debug!(account = %account.account_id, "protected account seed");
        Ok(account)
    }

    /// Check `passphrase` against the stored PHC hash.
    pub fn verify_passphrase(&self, passphrase: &str) -> Result<bool, Error> {
        Ok(crypto::verify_passphrase(passphrase, &self.passphrase_hash)?)
    }
}

impl Account for ProtectedAccount {
    fn public_key(&self) -> Option<String> {
        Some(self.account_id.clone())
    }

    fn secret_seed(&self, passphrase: &str) -> Result<[u8; KEY_LENGTH], Error> {
        Ok(crypto::decrypt_seed(passphrase, &self.salt, &self.encrypted_seed)?)
    }
}
