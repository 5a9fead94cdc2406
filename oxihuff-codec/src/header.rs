//! HUFF header parsing.
//!
//! ```text
//! offset  size  field
//! 0       1     magic: 0x24 (4-bit symbols) or 0x28 (8-bit symbols)
//! 1       3     decompressed length, little-endian
//! 4       1     tree-size selector s; tree region is [4, 4 + (s + 1) * 2)
//! 5       ..    root descriptor, rest of the packed tree
//! ```
//!
//! The compressed body starts right after the tree region.

use oxihuff_core::ByteCursor;
use oxihuff_core::error::{HuffError, Result};
use std::ops::Range;

/// Size of the fixed header, not counting the tree-size selector.
pub const HEADER_LEN: usize = 4;

/// Offset of the tree-size selector, which is also where the tree region starts.
pub const TREE_OFFSET: usize = HEADER_LEN;

/// Offset of the root descriptor.
pub const ROOT_OFFSET: usize = TREE_OFFSET + 1;

/// Largest length a 24-bit header field can declare.
pub const MAX_DECLARED_LEN: usize = 0x00FF_FFFF;

/// Symbol width of a HUFF stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockMode {
    /// Each symbol is a nibble; pairs form one output byte.
    Nibble,
    /// Each symbol is one output byte.
    Byte,
}

impl BlockMode {
    /// Parse the magic byte.
    pub fn from_magic(magic: u8) -> Option<Self> {
        match magic {
            0x24 => Some(Self::Nibble),
            0x28 => Some(Self::Byte),
            _ => None,
        }
    }

    /// The magic byte for this mode.
    pub fn magic(&self) -> u8 {
        match self {
            Self::Nibble => 0x24,
            Self::Byte => 0x28,
        }
    }

    /// Bits carried by one symbol.
    pub fn symbol_bits(&self) -> u8 {
        match self {
            Self::Nibble => 4,
            Self::Byte => 8,
        }
    }
}

/// Parsed HUFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffHeader {
    /// Symbol width.
    pub mode: BlockMode,
    /// Declared decompressed length in bytes.
    pub decompressed_len: usize,
    /// Raw tree-size selector.
    pub tree_selector: u8,
}

impl HuffHeader {
    /// Parse the header at the start of `data`.
    ///
    /// Only the first five bytes are read; the tree region itself is not
    /// checked against the buffer length here.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        let magic = cursor.read_u8()?;
        let mode =
            BlockMode::from_magic(magic).ok_or_else(|| HuffError::unrecognized_format(magic))?;
        let decompressed_len = cursor.read_u24_le()? as usize;
        let tree_selector = cursor.read_u8()?;

        Ok(Self {
            mode,
            decompressed_len,
            tree_selector,
        })
    }

    /// Size of the tree region in bytes, selector byte included.
    pub fn tree_size(&self) -> usize {
        (usize::from(self.tree_selector) + 1) * 2
    }

    /// Absolute byte range of the tree region.
    pub fn tree_region(&self) -> Range<usize> {
        TREE_OFFSET..TREE_OFFSET + self.tree_size()
    }

    /// Absolute offset of the first body byte.
    pub fn body_offset(&self) -> usize {
        self.tree_region().end
    }

    /// Encode back to the five header bytes.
    ///
    /// Only the low 24 bits of `decompressed_len` fit in the header; lengths
    /// above [`MAX_DECLARED_LEN`] are truncated (and trip a debug assertion).
    pub fn to_bytes(&self) -> [u8; 5] {
        debug_assert!(
            self.decompressed_len <= MAX_DECLARED_LEN,
            "decompressed length {} does not fit in 24 bits",
            self.decompressed_len
        );
        let len = ((self.decompressed_len & MAX_DECLARED_LEN) as u32).to_le_bytes();
        [self.mode.magic(), len[0], len[1], len[2], self.tree_selector]
    }
}

/// Quick check whether `data` starts like a HUFF stream.
pub fn is_huff(data: &[u8]) -> bool {
    data.len() > ROOT_OFFSET && BlockMode::from_magic(data[0]).is_some()
}
