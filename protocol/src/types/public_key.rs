//! Account public keys as they appear on the wire.

use std::fmt;
use std::str::FromStr;

use crate::config::{KEY_LENGTH, SIGNATURE_HINT_LENGTH};
use crate::crypto::strkey::{self, StrKeyError, VersionByte};
use crate::xdr::{Xdr, XdrError, XdrReader, XdrWriter};

const KEY_TYPE_ED25519: i32 = 0;

/// `union PublicKey switch (PublicKeyType type)`.
///
/// Only Ed25519 exists today. The 32-byte length is carried by the array
/// type, so a wrapped key of any other length cannot be constructed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519([u8; KEY_LENGTH]),
}

impl PublicKey {
    /// Wrap raw Ed25519 public key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        PublicKey::Ed25519(bytes)
    }

    /// Wrap a slice, checking its length.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, StrKeyError> {
        let bytes: [u8; KEY_LENGTH] = slice
            .try_into()
            .map_err(|_| StrKeyError::InvalidLength(slice.len()))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Parse a `G...` account id.
    pub fn from_account_id(account_id: &str) -> Result<Self, StrKeyError> {
        strkey::decode(VersionByte::AccountId, account_id).map(Self::from_bytes)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        match self {
            PublicKey::Ed25519(bytes) => bytes,
        }
    }

    /// The `G...` StrKey form shown to users and used in Horizon URLs.
    pub fn account_id(&self) -> String {
        strkey::encode(VersionByte::AccountId, self.as_bytes())
    }

    /// Last four bytes of the key: the hint attached to its signatures.
    pub fn signature_hint(&self) -> [u8; SIGNATURE_HINT_LENGTH] {
        let bytes = self.as_bytes();
        let mut hint = [0u8; SIGNATURE_HINT_LENGTH];
        hint.copy_from_slice(&bytes[KEY_LENGTH - SIGNATURE_HINT_LENGTH..]);
        hint
    }

    pub fn discriminant(&self) -> i32 {
        match self {
            PublicKey::Ed25519(_) => KEY_TYPE_ED25519,
        }
    }
}

impl Xdr for PublicKey {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_i32(self.discriminant());
        match self {
            PublicKey::Ed25519(bytes) => w.write_fixed_opaque(bytes),
        }
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_i32()? {
            KEY_TYPE_ED25519 => Ok(PublicKey::Ed25519(r.read_fixed_opaque()?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "PublicKey",
                value,
            }),
        }
    }
}

impl FromStr for PublicKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_account_id(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.account_id())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.account_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_discriminant_then_raw_key() {
        let pk = PublicKey::from_bytes([0x11; 32]);
        let bytes = pk.to_xdr();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..], &[0x11; 32]);
        assert_eq!(PublicKey::from_xdr(&bytes).unwrap(), pk);
    }

    #[test]
    fn unknown_key_type_is_rejected() {
        let mut bytes = PublicKey::from_bytes([0; 32]).to_xdr();
        bytes[3] = 1;
        assert_eq!(
            PublicKey::from_xdr(&bytes),
            Err(XdrError::UnknownDiscriminant { type_name: "PublicKey", value: 1 })
        );
    }

    #[test]
    fn hint_is_last_four_bytes() {
        let mut raw = [0u8; 32];
        raw[28..].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(PublicKey::from_bytes(raw).signature_hint(), [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn account_id_roundtrip() {
        let pk = PublicKey::from_bytes([0x42; 32]);
        let id = pk.account_id();
        assert!(id.starts_with('G'));
        assert_eq!(id.parse::<PublicKey>().unwrap(), pk);
    }

    #[test]
    fn try_from_slice_checks_length() {
        assert!(PublicKey::try_from_slice(&[0u8; 31]).is_err());
        assert!(PublicKey::try_from_slice(&[0u8; 32]).is_ok());
    }
}
