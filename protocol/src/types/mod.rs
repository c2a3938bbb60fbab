//! # Wire Types
//!
//! The structs and unions the network exchanges, each with a hand-written
//! [`Xdr`](crate::xdr::Xdr) impl. Structs encode their fields in declaration
//! order with no names or separators; unions are Rust enums whose
//! `discriminant()` and `decode` match arms are the only place a tag number
//! appears, so adding a variant touches exactly one encode/decode pair.
//!
//! ```text
//! public_key.rs  — PublicKey (KEY_TYPE_ED25519)
//! asset.rs       — Asset (native, alphanum4, alphanum12)
//! memo.rs        — Memo (none, text, id, hash, return), MemoText
//! operation.rs   — Operation, OperationBody, PaymentOp, ChangeTrustOp
//! transaction.rs — TimeBounds, Transaction
//! envelope.rs    — TaggedTransaction, TransactionSignaturePayload,
//!                 DecoratedSignature, TransactionEnvelope
//! ```
//!
//! Nothing here does I/O or cryptography beyond formatting keys as StrKeys.

pub mod asset;
pub mod envelope;
pub mod memo;
pub mod operation;
pub mod public_key;
pub mod transaction;

pub use asset::Asset;
pub use envelope::{
    DecoratedSignature, TaggedTransaction, TransactionEnvelope, TransactionSignaturePayload,
};
pub use memo::{Memo, MemoText};
pub use operation::{ChangeTrustOp, Operation, OperationBody, PaymentOp};
pub use public_key::PublicKey;
pub use transaction::{TimeBounds, Transaction};
