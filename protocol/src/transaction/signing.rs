//! Transaction signing.
//!
//! What gets signed is not the transaction bytes but a hash of the
//! signature payload:
//!
//! ```text
//! payload   = network_id(passphrase) | ENVELOPE_TYPE_TX | xdr(tx)
//! message   = sha256(xdr(payload))
//! signature = ed25519_sign(seed, message)
//! hint      = public_key[28..32]
//! ```
//!
//! Ed25519 hashes internally as well, so the message is effectively hashed
//! twice. The network expects exactly this layout; any deviation produces a
//! signature it silently refuses.

use tracing::debug;

use crate::crypto::{network_id, sha256, Keypair};
use crate::error::Error;
use crate::types::{
    DecoratedSignature, TaggedTransaction, Transaction, TransactionEnvelope,
    TransactionSignaturePayload,
};
use crate::xdr::Xdr;

/// The payload a signer commits to for `tx` on the given network.
pub fn signature_payload(tx: &Transaction, network_passphrase: &str) -> TransactionSignaturePayload {
    TransactionSignaturePayload {
        network_id: network_id(network_passphrase),
        tagged_transaction: TaggedTransaction::Tx(tx.clone()),
    }
}

/// The transaction hash: SHA-256 of the signature payload's XDR.
///
/// This is both the 32-byte message that gets signed and the id Horizon
/// reports for the transaction (hex encoded).
pub fn transaction_hash(tx: &Transaction, network_passphrase: &str) -> [u8; 32] {
    sha256(&signature_payload(tx, network_passphrase).to_xdr())
}

/// Sign `tx` with `keypair`, producing a single-signature envelope.
///
/// `keypair` must belong to the transaction's source account; anything else
/// is reported as [`Error::MissingSecretKey`] before a signature is made.
pub fn sign_transaction(
    tx: &Transaction,
    keypair: &Keypair,
    network_passphrase: &str,
) -> Result<TransactionEnvelope, Error> {
    if keypair.public_key() != *tx.source_account() {
        return Err(Error::MissingSecretKey);
    }
    let signature = decorated_signature(tx, keypair, network_passphrase)?;
    TransactionEnvelope::new(tx.clone(), vec![signature])
}

/// Add `keypair`'s signature to an existing envelope.
///
/// The signer need not be the source account: multi-signature accounts and
/// operations with their own source need signatures from other keys. The
/// original envelope is left untouched.
pub fn sign_envelope(
    envelope: &TransactionEnvelope,
    keypair: &Keypair,
    network_passphrase: &str,
) -> Result<TransactionEnvelope, Error> {
    let signature = decorated_signature(envelope.tx(), keypair, network_passphrase)?;
    envelope.with_signature(signature)
}

fn decorated_signature(
    tx: &Transaction,
    keypair: &Keypair,
    network_passphrase: &str,
) -> Result<DecoratedSignature, Error> {
    let hash = transaction_hash(tx, network_passphrase);
    let signature = keypair
        .try_sign(&hash)
        .map_err(|e| Error::SigningFailed(e.to_string()))?;
    let hint = keypair.signature_hint();
    debug!(
        signer = %keypair.account_id(),
        hint = %hex::encode(hint),
        tx_hash = %hex::encode(hash),
        seq = tx.seq_num(),
        "signed transaction"
    );
    DecoratedSignature::new(hint, signature.to_vec())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
