//! # StrKey
//!
//! The human-facing text form of keys: `G...` for account ids, `S...` for
//! secret seeds.
//!
//! ```text
//! base32( version:1 | payload:32 | crc16_xmodem(version | payload):2 LE )
//! ```
//!
//! Upper-case RFC 4648 alphabet, no padding, always 56 characters. Decoding
//! checks, in order: the alphabet, the decoded length, the checksum and then
//! the version byte, so a typo is reported as a checksum failure rather than
//! as "wrong kind of key".

use data_encoding::BASE32_NOPAD;
use thiserror::Error;

use crate::config::{
    KEY_LENGTH, STRKEY_DECODED_LENGTH, STRKEY_VERSION_ACCOUNT_ID, STRKEY_VERSION_SEED,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrKeyError {
    #[error("not valid base32")]
    InvalidBase32,

    #[error("decoded length {0} bytes, expected {STRKEY_DECODED_LENGTH}")]
    InvalidLength(usize),

    #[error("checksum mismatch: computed {computed:#06x}, encoded {encoded:#06x}")]
    ChecksumMismatch { computed: u16, encoded: u16 },

    #[error("version byte {actual:#04x}, expected {expected:#04x}")]
    VersionMismatch { expected: u8, actual: u8 },

    #[error("unknown version byte {0:#04x}")]
    UnknownVersion(u8),
}

/// What a StrKey holds, identified by its leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionByte {
    /// Ed25519 public key; encodes with a leading `G`.
    AccountId,
    /// Ed25519 seed; encodes with a leading `S`.
    Seed,
}

impl VersionByte {
    pub fn as_u8(self) -> u8 {
        match self {
            VersionByte::AccountId => STRKEY_VERSION_ACCOUNT_ID,
            VersionByte::Seed => STRKEY_VERSION_SEED,
        }
    }

    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            STRKEY_VERSION_ACCOUNT_ID => Some(VersionByte::AccountId),
            STRKEY_VERSION_SEED => Some(VersionByte::Seed),
            _ => None,
        }
    }
}

/// CRC-16/XMODEM: polynomial 0x1021, initial value 0, no reflection.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

pub fn encode(version: VersionByte, payload: &[u8; KEY_LENGTH]) -> String {
    let mut raw = Vec::with_capacity(STRKEY_DECODED_LENGTH);
    raw.push(version.as_u8());
    raw.extend_from_slice(payload);
    let crc = crc16_xmodem(&raw);
    raw.extend_from_slice(&crc.to_le_bytes());
    BASE32_NOPAD.encode(&raw)
}

/// Decode a StrKey that must carry `expected` as its version.
pub fn decode(expected: VersionByte, text: &str) -> Result<[u8; KEY_LENGTH], StrKeyError> {
    let (version, payload) = decode_raw(text)?;
    if version != expected.as_u8() {
        return Err(StrKeyError::VersionMismatch {
            expected: expected.as_u8(),
            actual: version,
        });
    }
    Ok(payload)
}

/// Decode a StrKey of either kind.
pub fn decode_any(text: &str) -> Result<(VersionByte, [u8; KEY_LENGTH]), StrKeyError> {
    let (version, payload) = decode_raw(text)?;
    let version = VersionByte::from_u8(version).ok_or(StrKeyError::UnknownVersion(version))?;
    Ok((version, payload))
}

fn decode_raw(text: &str) -> Result<(u8, [u8; KEY_LENGTH]), StrKeyError> {
    let raw = BASE32_NOPAD
        .decode(text.as_bytes())
        .map_err(|_| StrKeyError::InvalidBase32)?;
    if raw.len() != STRKEY_DECODED_LENGTH {
        return Err(StrKeyError::InvalidLength(raw.len()));
    }

    let (body, checksum) = raw.split_at(STRKEY_DECODED_LENGTH - 2);
    let encoded = u16::from_le_bytes([checksum[0], checksum[1]]);
    let computed = crc16_xmodem(body);
    if encoded != computed {
        return Err(StrKeyError::ChecksumMismatch { computed, encoded });
    }

    let mut payload = [0u8; KEY_LENGTH];
    payload.copy_from_slice(&body[1..]);
    Ok((body[0], payload))
}
