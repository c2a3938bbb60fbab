//! Envelope signature verification.
//!
//! A [`DecoratedSignature`](crate::types::DecoratedSignature) names its key
//! only by a four-byte hint, so verification takes a set of candidate keys,
//! shortlists those whose suffix matches each hint and runs Ed25519 only on
//! that shortlist.

use tracing::debug;

use super::signing::transaction_hash;
use crate::crypto::verify_signature;
use crate::types::{PublicKey, TransactionEnvelope};

/// The candidates that produced a valid signature on `envelope`.
///
/// Each returned key appears once, in the order its signature appears in the
/// envelope. Signatures with no matching candidate are ignored.
pub fn verify_envelope(
    envelope: &TransactionEnvelope,
    candidates: &[PublicKey],
    network_passphrase: &str,
) -> Vec<PublicKey> {
    let hash = transaction_hash(envelope.tx(), network_passphrase);
    let mut signers: Vec<PublicKey> = Vec::new();

    for signature in envelope.signatures() {
        let matched = candidates
            .iter()
            .filter(|key| key.signature_hint() == *signature.hint())
            .find(|key| verify_signature(key, &hash, signature.signature()));
        match matched {
            Some(key) if !signers.contains(key) => signers.push(*key),
            Some(_) => {}
            None => debug!(hint = %hex::encode(signature.hint()), "signature matched no candidate"),
        }
    }
    signers
}

/// Whether the envelope carries a valid signature from its source account.
pub fn is_signed_by_source(envelope: &TransactionEnvelope, network_passphrase: &str) -> bool {
    let source = *envelope.tx().source_account();
    !verify_envelope(envelope, &[source], network_passphrase).is_empty()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
