//! Transaction memos.
//!
//! All five arms decode. Older clients read only the discriminant and
//! returned `None` for everything, which silently dropped memos from any
//! envelope they parsed; this implementation does not do that.

use std::fmt;

use crate::config::MAX_MEMO_TEXT_LENGTH;
use crate::error::Error;
use crate::xdr::{Xdr, XdrError, XdrReader, XdrWriter};

const MEMO_NONE: i32 = 0;
const MEMO_TEXT: i32 = 1;
const MEMO_ID: i32 = 2;
const MEMO_HASH: i32 = 3;
const MEMO_RETURN: i32 = 4;

/// `string<28>`: memo text, at most 28 bytes of UTF-8.
///
/// The only ways in are [`TryFrom`] and decoding, both of which check the
/// length, so every `MemoText` encodes to something that decodes back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoText(String);

impl MemoText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MemoText {
    type Error = Error;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        if text.len() > MAX_MEMO_TEXT_LENGTH {
            return Err(Error::EncodingFailed(format!(
                "memo text is {} bytes, maximum is {MAX_MEMO_TEXT_LENGTH}",
                text.len()
            )));
        }
        Ok(MemoText(text))
    }
}

impl TryFrom<&str> for MemoText {
    type Error = Error;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        MemoText::try_from(text.to_string())
    }
}

impl AsRef<str> for MemoText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `union Memo switch (MemoType type)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Memo {
    #[default]
    None,
    Text(MemoText),
    Id(u64),
    Hash([u8; 32]),
    Return([u8; 32]),
}

impl Memo {
    /// A text memo, rejecting anything over 28 bytes.
    pub fn text(text: &str) -> Result<Self, Error> {
        MemoText::try_from(text).map(Memo::Text)
    }

    pub fn discriminant(&self) -> i32 {
        match self {
            Memo::None => MEMO_NONE,
            Memo::Text(_) => MEMO_TEXT,
            Memo::Id(_) => MEMO_ID,
            Memo::Hash(_) => MEMO_HASH,
            Memo::Return(_) => MEMO_RETURN,
        }
    }
}

impl Xdr for Memo {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_i32(self.discriminant());
        match self {
            Memo::None => {}
            Memo::Text(text) => w.write_string(text.as_str()),
            Memo::Id(id) => w.write_u64(*id),
            Memo::Hash(hash) | Memo::Return(hash) => w.write_fixed_opaque(hash),
        }
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_i32()? {
            MEMO_NONE => Ok(Memo::None),
            MEMO_TEXT => Ok(Memo::Text(MemoText(r.read_string(MAX_MEMO_TEXT_LENGTH)?))),
            MEMO_ID => Ok(Memo::Id(r.read_u64()?)),
            MEMO_HASH => Ok(Memo::Hash(r.read_fixed_opaque()?)),
            MEMO_RETURN => Ok(Memo::Return(r.read_fixed_opaque()?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "Memo",
                value,
            }),
        }
    }
}
