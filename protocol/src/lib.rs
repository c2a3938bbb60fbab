// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # stellar-kit — Core Library
//!
//! Client-side plumbing for Stellar-compatible ledgers: build a transaction,
//! encode it byte for byte in XDR, sign it the way the network expects, and
//! keep the signing seed encrypted while it is not in use.
//!
//! ## Architecture
//!
//! - **xdr** — Binary codec: big-endian, 4-byte aligned, bounds-checked.
//! - **types** — Wire types: keys, assets, memos, operations, envelopes.
//! - **crypto** — Ed25519 keys, StrKey text form, SHA-256, passphrase KDF.
//! - **transaction** — Builder, signer and signature verification.
//! - **account** — Accounts whose seed is stored encrypted.
//! - **horizon** — Collaborator traits and the HTTP client behind them.
//! - **client** — Payment and trust-line flows over the collaborators.
//! - **config** — Protocol constants and network parameters.
//! - **error** — The crate-level error type.
//!
//! ## Example
//!
//! ```
//! use stellar_kit::config::TESTNET_PASSPHRASE;
//! use stellar_kit::crypto::Keypair;
//! use stellar_kit::transaction::{sign_transaction, verify_envelope, TransactionBuilder};
//! use stellar_kit::types::{Asset, Operation, PublicKey};
//!
//! let alice = Keypair::generate();
//! let bob = PublicKey::from_bytes([7; 32]);
//!
//! let tx = TransactionBuilder::new()
//!     .source(alice.public_key())
//!     .current_sequence(5)
//!     .operation(Operation::payment(bob, Asset::Native, 1_000_000))
//!     .build()
//!     .unwrap();
//! let envelope = sign_transaction(&tx, &alice, TESTNET_PASSPHRASE).unwrap();
//!
//! assert_eq!(envelope.tx().seq_num(), 6);
//! assert_eq!(
//!     verify_envelope(&envelope, &[alice.public_key()], TESTNET_PASSPHRASE),
//!     vec![alice.public_key()]
//! );
//! ```

pub mod account;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod horizon;
pub mod transaction;
pub mod types;
pub mod xdr;

pub use error::Error;
