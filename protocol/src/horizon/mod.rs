//! # Horizon Boundary
//!
//! The signer never talks to the network itself. It asks three narrow
//! collaborators for what it needs:
//!
//! - [`SequenceProvider`]: an account's current sequence number.
//! - [`BalanceProvider`]: an account's balance lines, to check trust lines.
//! - [`SubmissionSink`]: somewhere to post a signed envelope.
//!
//! [`HorizonClient`] implements all three over HTTP. Tests and offline
//! tools substitute their own implementations.

pub mod client;
pub mod responses;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::Error;
use crate::types::TransactionEnvelope;
use crate::xdr::Xdr;

pub use client::HorizonClient;
pub use responses::{
    parse_amount, AccountDetails, Balance, Problem, ResultCodes, TransactionResponse,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HorizonError {
    #[error("account not found: {0}")]
    NotFound(String),

    /// Connection, timeout or server-side (5xx, 429) failure.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("rejected ({status}): {title} {result_codes:?}")]
    Rejected {
        status: u16,
        title: String,
        result_codes: Vec<String>,
        result_xdr: Option<String>,
    },
}

impl HorizonError {
    /// Whether the request may succeed if simply repeated.
    pub fn is_transport(&self) -> bool {
        matches!(self, HorizonError::Transport(_))
    }
}

impl From<reqwest::Error> for HorizonError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            HorizonError::Malformed(e.to_string())
        } else {
            HorizonError::Transport(e.to_string())
        }
    }
}

#[async_trait]
pub trait SequenceProvider: Send + Sync {
    /// The account's current (last used) sequence number.
    async fn fetch_sequence(&self, account_id: &str) -> Result<u64, HorizonError>;
}

#[async_trait]
pub trait BalanceProvider: Send + Sync {
    async fn fetch_balances(&self, account_id: &str) -> Result<Vec<Balance>, HorizonError>;
}

#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Post `envelope`, returning the transaction hash on acceptance.
    async fn submit(&self, envelope: &TransactionEnvelope) -> Result<String, HorizonError>;
}

/// Everything [`StellarClient`](crate::client::StellarClient) needs.
pub trait Horizon: SequenceProvider + BalanceProvider + SubmissionSink {}

impl<T: SequenceProvider + BalanceProvider + SubmissionSink> Horizon for T {}

/// The form body Horizon expects on `POST /transactions`:
/// `tx=<url-encoded base64 XDR>`.
pub fn submission_body(envelope: &TransactionEnvelope) -> Result<String, Error> {
    serde_urlencoded::to_string(&[("tx", envelope.to_xdr_base64())])
        .map_err(|e| Error::EncodingFailed(e.to_string()))
}
