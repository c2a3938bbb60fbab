//! Append-only XDR output buffer.

use super::padding_for;

/// Accumulates the XDR encoding of a value.
///
/// Writes are infallible: every in-memory value has exactly one encoding.
/// Callers that build composite types just call the field writers in
/// declaration order.
#[derive(Debug, Default, Clone)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::with_capacity(256) }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_u32(u32::from(v));
    }

    /// `opaque[N]`: raw bytes plus zero padding, no length prefix.
    pub fn write_fixed_opaque(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.write_padding(bytes.len());
    }

    /// `opaque<max>`: length prefix, raw bytes, zero padding.
    ///
    /// The maximum is the decoder's problem; the types that carry bounded
    /// payloads enforce them at construction.
    pub fn write_var_opaque(&mut self, bytes: &[u8]) {
        self.write_u32(bytes.len() as u32);
        self.write_fixed_opaque(bytes);
    }

    /// `string<max>`: encoded exactly like `opaque<max>` over the UTF-8 bytes.
    pub fn write_string(&mut self, s: &str) {
        self.write_var_opaque(s.as_bytes());
    }

    /// `T<max>`: count prefix followed by each element's own encoding.
    pub fn write_array<T: super::Xdr>(&mut self, items: &[T]) {
        self.write_u32(items.len() as u32);
        for item in items {
            item.encode(self);
        }
    }

    fn write_padding(&mut self, len: usize) {
        self.buf.resize(self.buf.len() + padding_for(len), 0);
    }
}
