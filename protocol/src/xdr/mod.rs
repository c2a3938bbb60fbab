//! # XDR Binary Codec
//!
//! The network speaks XDR (RFC 4506): big-endian, 4-byte aligned, with
//! discriminated unions selected by a 4-byte tag. Every byte we emit is part
//! of a signature payload somewhere, so the rules here are not negotiable.
//!
//! ## Layout rules
//!
//! | Type                  | Encoding                                              |
//! |-----------------------|-------------------------------------------------------|
//! | `int` / `unsigned`    | 4 bytes, big-endian                                   |
//! | `hyper` / `unsigned hyper` | 8 bytes, big-endian                              |
//! | `bool`                | `unsigned` 0 or 1                                     |
//! | `opaque[N]`           | N bytes, zero-padded to a multiple of 4               |
//! | `opaque<max>`, `string<max>` | `unsigned` length, bytes, zero padding         |
//! | `T<max>` (array)      | `unsigned` count, then each element                   |
//! | `union`               | `int` discriminant, then the arm's payload            |
//! | `T*` (optional)       | `bool` presence flag, then `T` if present             |
//!
//! ## Decoding untrusted bytes
//!
//! Envelopes come back from the network and from users pasting base64 into
//! terminals. The [`XdrReader`] checks bounds before every read, length
//! prefixes are checked against both the declared maximum and the bytes
//! actually remaining, and nothing here panics on malformed input.

mod reader;
mod writer;

pub use reader::XdrReader;
pub use writer::XdrWriter;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

/// Errors raised while decoding XDR.
///
/// Encoding never fails; every variant here describes input that does not
/// match the wire definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    /// The buffer ended before the value did.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// A union discriminant has no matching arm.
    #[error("unknown {type_name} discriminant: {value}")]
    UnknownDiscriminant { type_name: &'static str, value: i32 },

    /// A length or count prefix exceeds the declared maximum.
    #[error("length {len} exceeds maximum {max}")]
    LengthExceedsMax { len: usize, max: usize },

    /// A boolean was neither 0 nor 1.
    #[error("invalid boolean value: {0}")]
    InvalidBool(u32),

    /// Padding after opaque data or a string was not all zero bytes.
    #[error("non-zero padding byte at offset {0}")]
    NonZeroPadding(usize),

    /// A string payload was not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// Bytes were left over after the top-level value was decoded.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// The base64 wrapper around the XDR could not be decoded.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}

/// A value with a canonical XDR representation.
///
/// Composite types implement this by encoding/decoding their fields in
/// declaration order on a shared writer/reader, so a struct's codec is just
/// the sequence of its fields' codecs.
pub trait Xdr: Sized {
    /// Appends this value's encoding to `w`.
    fn encode(&self, w: &mut XdrWriter);

    /// Reads one value from `r`, advancing its cursor.
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError>;

    /// Encodes into a fresh buffer.
    fn to_xdr(&self) -> Vec<u8> {
        let mut w = XdrWriter::new();
        self.encode(&mut w);
        w.into_bytes()
    }

    /// Decodes a complete buffer. Leftover bytes are an error: a valid
    /// envelope followed by junk is not a valid envelope.
    fn from_xdr(bytes: &[u8]) -> Result<Self, XdrError> {
        let mut r = XdrReader::new(bytes);
        let value = Self::decode(&mut r)?;
        r.finish()?;
        Ok(value)
    }

    /// Encodes and wraps in standard base64, the form Horizon accepts.
    fn to_xdr_base64(&self) -> String {
        BASE64.encode(self.to_xdr())
    }

    /// Inverse of [`to_xdr_base64`](Self::to_xdr_base64).
    fn from_xdr_base64(s: &str) -> Result<Self, XdrError> {
        let bytes = BASE64
            .decode(s.trim())
            .map_err(|e| XdrError::InvalidBase64(e.to_string()))?;
        Self::from_xdr(&bytes)
    }
}

/// Number of zero bytes needed after `len` bytes to reach a 4-byte boundary.
pub fn padding_for(len: usize) -> usize {
    (4 - len % 4) % 4
}

// ---------------------------------------------------------------------------
// Primitive impls
// ---------------------------------------------------------------------------

impl Xdr for i32 {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_i32(*self);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_i32()
    }
}

impl Xdr for u32 {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_u32(*self);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_u32()
    }
}

impl Xdr for i64 {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_i64(*self);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_i64()
    }
}

impl Xdr for u64 {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_u64(*self);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_u64()
    }
}

impl Xdr for bool {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_bool(*self);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_bool()
    }
}

impl<const N: usize> Xdr for [u8; N] {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_fixed_opaque(self);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_fixed_opaque::<N>()
    }
}

impl<T: Xdr> Xdr for Option<T> {
    fn encode(&self, w: &mut XdrWriter) {
        match self {
            Some(value) => {
                w.write_bool(true);
                value.encode(w);
            }
            None => w.write_bool(false),
        }
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        if r.read_bool()? {
            Ok(Some(T::decode(r)?))
        } else {
            Ok(None)
        }
    }
}
