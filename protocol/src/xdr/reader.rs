//! Bounds-checked XDR cursor.

use super::{padding_for, Xdr, XdrError};

/// A cursor over a borrowed XDR buffer.
///
/// Composite decoders share one reader and call the primitive reads in field
/// order; each read checks that enough bytes remain before touching them.
#[derive(Debug)]
pub struct XdrReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> XdrReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Fails if any bytes are left unread.
    pub fn finish(&self) -> Result<(), XdrError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(XdrError::TrailingBytes(n)),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], XdrError> {
        if n > self.remaining() {
            return Err(XdrError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_i32(&mut self) -> Result<i32, XdrError> {
        self.take_array::<4>().map(i32::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, XdrError> {
        self.take_array::<4>().map(u32::from_be_bytes)
    }

    pub fn read_i64(&mut self) -> Result<i64, XdrError> {
        self.take_array::<8>().map(i64::from_be_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64, XdrError> {
        self.take_array::<8>().map(u64::from_be_bytes)
    }

    pub fn read_bool(&mut self) -> Result<bool, XdrError> {
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(XdrError::InvalidBool(other)),
        }
    }

    /// `opaque[N]`: exactly N bytes, then the padding is skipped.
    pub fn read_fixed_opaque<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let out = self.take_array::<N>()?;
        self.skip_padding(N)?;
        Ok(out)
    }

    /// `opaque<max>`: length prefix checked against `max` and the remaining
    /// input before any allocation.
    pub fn read_var_opaque(&mut self, max: usize) -> Result<Vec<u8>, XdrError> {
        let len = self.read_length(max)?;
        let bytes = self.take(len)?.to_vec();
        self.skip_padding(len)?;
        Ok(bytes)
    }

    /// `string<max>`: like `opaque<max>`, and the bytes must be UTF-8.
    pub fn read_string(&mut self, max: usize) -> Result<String, XdrError> {
        let bytes = self.read_var_opaque(max)?;
        String::from_utf8(bytes).map_err(|_| XdrError::InvalidUtf8)
    }

    /// `T<max>`: count prefix then `count` elements.
    pub fn read_array<T: Xdr>(&mut self, max: usize) -> Result<Vec<T>, XdrError> {
        let count = self.read_length(max)?;
        // Every element occupies at least 4 bytes on the wire, so a count the
        // buffer cannot possibly hold is rejected before reserving memory.
        if count > self.remaining() / 4 {
            return Err(XdrError::UnexpectedEof {
                needed: count * 4,
                remaining: self.remaining(),
            });
        }
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode(self)?);
        }
        Ok(items)
    }

    fn read_length(&mut self, max: usize) -> Result<usize, XdrError> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(XdrError::LengthExceedsMax { len, max });
        }
        Ok(len)
    }

    /// Padding must be zero; anything else would decode to a value that
    /// re-encodes to different bytes.
    fn skip_padding(&mut self, len: usize) -> Result<(), XdrError> {
        let start = self.pos;
        let padding = self.take(padding_for(len))?;
        match padding.iter().position(|&b| b != 0) {
            Some(i) => Err(XdrError::NonZeroPadding(start + i)),
            None => Ok(()),
        }
    }
}
