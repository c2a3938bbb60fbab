//! Crate-level error type.
//!
//! Each layer has its own `thiserror` enum ([`XdrError`], [`StrKeyError`],
//! [`KeyError`], [`HorizonError`]); this one composes them for the
//! operations that cross layers.

use thiserror::Error;

use crate::crypto::{KeyError, StrKeyError};
use crate::horizon::HorizonError;
use crate::types::Asset;
use crate::xdr::XdrError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no public key for the signing account")]
    MissingPublicKey,

    #[error("no secret key for the signing account, or it does not match the source account")]
    MissingSecretKey,

    #[error("no sequence number for the source account")]
    MissingSequence,

    #[error("malformed wire data: {0}")]
    MalformedWireData(#[from] XdrError),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("decoding failed: {0}")]
    DecodingFailed(String),

    #[error("key derivation failed: {0}")]
    HashingOrKdfFailed(String),

    #[error("passphrase incorrect")]
    PassphraseIncorrect,

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("account has no balance line for {0}")]
    DestinationNotReady(Asset),

    #[error("{count} operations, maximum is {max}")]
    TooManyOperations { count: usize, max: usize },

    #[error("sequence number overflow")]
    SequenceOverflow,

    #[error(transparent)]
    Horizon(#[from] HorizonError),
}

impl Error {
    /// Whether retrying the same call might succeed.
    ///
    /// Only a missing sequence number (the account may not be visible yet)
    /// and transport-level Horizon failures qualify. A rejected transaction
    /// or a bad passphrase will fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::MissingSequence => true,
            Error::Horizon(e) => e.is_transport(),
            _ => false,
        }
    }
}

impl From<StrKeyError> for Error {
    fn from(e: StrKeyError) -> Self {
        Error::DecodingFailed(e.to_string())
    }
}

impl From<KeyError> for Error {
    fn from(e: KeyError) -> Self {
        match e {
            KeyError::EncodingFailed(msg) => Error::EncodingFailed(msg),
            KeyError::DecodingFailed(msg) => Error::DecodingFailed(msg),
            KeyError::HashingFailed(msg) => Error::HashingOrKdfFailed(msg),
            KeyError::PassphraseIncorrect => Error::PassphraseIncorrect,
            KeyError::StrKey(e) => e.into(),
        }
    }
}
