//! Bounds-checked little-endian byte cursor.
//!
//! Header fields and body windows in HUFF data are little-endian integers of
//! 1 to 4 bytes. [`ByteCursor`] reads them from an in-memory slice and turns
//! every short read into [`HuffError::TruncatedInput`] instead of a panic.

use crate::error::{HuffError, Result};

/// A read cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a cursor positioned at `pos`.
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor to an absolute position.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Bytes left between the cursor and the end of the slice.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// The underlying slice.
    pub fn get_ref(&self) -> &'a [u8] {
        self.data
    }

    /// Read `len` bytes and advance.
    ///
    /// A cursor positioned past the end fails even for `len == 0`.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let data = self.data;
        let bytes = self
            .pos
            .checked_add(len)
            .and_then(|end| data.get(self.pos..end))
            .ok_or_else(|| HuffError::truncated(self.pos, len, self.remaining()))?;
        self.pos += len;
        Ok(bytes)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a little-endian unsigned integer of `len` bytes (at most 4).
    pub fn read_uint_le(&mut self, len: usize) -> Result<u32> {
        debug_assert!(len <= 4, "read_uint_le supports at most 4 bytes");
        let bytes = self.read_bytes(len)?;
        Ok(bytes
            .iter()
            .rev()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
    }

    /// Read a little-endian 24-bit integer.
    pub fn read_u24_le(&mut self) -> Result<u32> {
        self.read_uint_le(3)
    }

    /// Read a little-endian 32-bit integer.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
