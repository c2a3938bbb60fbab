//! # Transaction Signer
//!
//! Turns operations into a signed, submittable envelope.
//!
//! ```text
//! builder.rs      — TransactionBuilder: source + current sequence + operations -> Transaction
//! signing.rs      — signature payload, transaction hash, sign / co-sign
//! verification.rs — hint-shortlisted signature verification
//! ```
//!
//! ## Pipeline
//!
//! 1. **Build**: fee = base fee x operation count, seq = current + 1.
//! 2. **Hash**: SHA-256 over `network_id | ENVELOPE_TYPE_TX | tx`.
//! 3. **Sign**: Ed25519 over the hash, hinted with the key's last four bytes.
//! 4. **Wrap**: transaction plus signatures form the envelope.
//!
//! Each step either produces its full output or an error; nothing is
//! partially signed.

pub mod builder;
pub mod signing;
pub mod verification;

pub use builder::TransactionBuilder;
pub use signing::{sign_envelope, sign_transaction, signature_payload, transaction_hash};
pub use verification::{is_signed_by_source, verify_envelope};
