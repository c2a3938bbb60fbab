//! Assets: the native lumen and credits issued by an account.

use std::fmt;
use std::str::FromStr;

use super::PublicKey;
use crate::error::Error;
use crate::xdr::{Xdr, XdrError, XdrReader, XdrWriter};

const ASSET_TYPE_NATIVE: i32 = 0;
const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;

/// `union Asset switch (AssetType type)`.
///
/// Issued asset codes are stored right-padded with zero bytes, exactly as
/// they sit on the wire. Use [`Asset::issued`] to build one from a code
/// string; it picks the 4- or 12-byte arm from the code's length.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Native,
    CreditAlphanum4 { code: [u8; 4], issuer: PublicKey },
    CreditAlphanum12 { code: [u8; 12], issuer: PublicKey },
}

impl Asset {
    /// Credit asset from a code (1-12 ASCII letters and digits) and issuer.
    ///
    /// Codes of 1-4 characters use the alphanum4 arm, 5-12 the alphanum12
    /// arm. Anything else is rejected rather than truncated.
    pub fn issued(code: &str, issuer: PublicKey) -> Result<Self, Error> {
        if code.is_empty() || code.len() > 12 || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(Error::EncodingFailed(format!(
                "asset code must be 1-12 ASCII alphanumerics, got {code:?}"
            )));
        }
        if code.len() <= 4 {
            let mut buf = [0u8; 4];
            buf[..code.len()].copy_from_slice(code.as_bytes());
            Ok(Asset::CreditAlphanum4 { code: buf, issuer })
        } else {
            let mut buf = [0u8; 12];
            buf[..code.len()].copy_from_slice(code.as_bytes());
            Ok(Asset::CreditAlphanum12 { code: buf, issuer })
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }

    /// The asset code with its zero padding stripped, `None` for native.
    pub fn code(&self) -> Option<String> {
        let raw: &[u8] = match self {
            Asset::Native => return None,
            Asset::CreditAlphanum4 { code, .. } => code,
            Asset::CreditAlphanum12 { code, .. } => code,
        };
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Some(String::from_utf8_lossy(&raw[..end]).into_owned())
    }

    /// The issuing account, `None` for native.
    pub fn issuer(&self) -> Option<&PublicKey> {
        match self {
            Asset::Native => None,
            Asset::CreditAlphanum4 { issuer, .. } | Asset::CreditAlphanum12 { issuer, .. } => {
                Some(issuer)
            }
        }
    }

    /// Horizon's `asset_type` string for this asset.
    pub fn type_name(&self) -> &'static str {
        match self {
            Asset::Native => "native",
            Asset::CreditAlphanum4 { .. } => "credit_alphanum4",
            Asset::CreditAlphanum12 { .. } => "credit_alphanum12",
        }
    }

    pub fn discriminant(&self) -> i32 {
        match self {
            Asset::Native => ASSET_TYPE_NATIVE,
            Asset::CreditAlphanum4 { .. } => ASSET_TYPE_CREDIT_ALPHANUM4,
            Asset::CreditAlphanum12 { .. } => ASSET_TYPE_CREDIT_ALPHANUM12,
        }
    }
}

impl Xdr for Asset {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_i32(self.discriminant());
        match self {
            Asset::Native => {}
            Asset::CreditAlphanum4 { code, issuer } => {
                w.write_fixed_opaque(code);
                issuer.encode(w);
            }
            Asset::CreditAlphanum12 { code, issuer } => {
                w.write_fixed_opaque(code);
                issuer.encode(w);
            }
        }
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_i32()? {
            ASSET_TYPE_NATIVE => Ok(Asset::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Asset::CreditAlphanum4 {
                code: r.read_fixed_opaque()?,
                issuer: PublicKey::decode(r)?,
            }),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Asset::CreditAlphanum12 {
                code: r.read_fixed_opaque()?,
                issuer: PublicKey::decode(r)?,
            }),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "Asset",
                value,
            }),
        }
    }
}

/// Parses `native` or `CODE:GISSUER...`.
impl FromStr for Asset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("native") {
            return Ok(Asset::Native);
        }
        let (code, issuer) = s
            .split_once(':')
            .ok_or_else(|| Error::DecodingFailed(format!("expected CODE:ISSUER, got {s:?}")))?;
        let issuer = PublicKey::from_account_id(issuer)?;
        Asset::issued(code, issuer)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.issuer()) {
            (Some(code), Some(issuer)) => write!(f, "{code}:{issuer}"),
            _ => f.write_str("native"),
        }
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Asset({self})")
    }
}
