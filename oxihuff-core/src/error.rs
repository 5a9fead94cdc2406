//! Error types for OxiHuff operations.
//!
//! Every failure a HUFF decode can hit maps to one variant here. All of them
//! are terminal for the decode call that produced them; deciding whether to
//! skip an entry or abort a whole archive is left to the caller.

use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffError {
    /// The header magic byte selects neither 4-bit nor 8-bit block mode.
    #[error("Unrecognized format: magic byte {magic:#04x} is not a HUFF block mode")]
    UnrecognizedFormat {
        /// The magic byte found.
        magic: u8,
    },

    /// The packed tree region could not produce a usable trie.
    #[error("Corrupt Huffman tree at offset {offset}: {message}")]
    CorruptTree {
        /// Byte offset of the offending descriptor.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// Trie descent needed a child that does not exist.
    #[error("Corrupt stream: no Huffman code matches at bit position {bit_position}")]
    CorruptStream {
        /// Number of body bits consumed when the lookup failed.
        bit_position: u64,
    },

    /// The input ended before the required bytes were available.
    #[error("Truncated input at offset {offset}: need {needed} bytes, have {available}")]
    TruncatedInput {
        /// Byte offset where the read was attempted.
        offset: usize,
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// An explicit code table maps a code through or onto an existing node.
    #[error("Prefix conflict: code {code} collides with an existing code")]
    PrefixConflict {
        /// The conflicting code, rendered as binary digits.
        code: String,
    },

    /// The declared decompressed length exceeds the configured limit.
    #[error("Declared output length {declared} exceeds limit {limit}")]
    OutputTooLarge {
        /// Length declared in the header.
        declared: usize,
        /// Configured maximum.
        limit: usize,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
    /// Create an unrecognized format error.
    pub fn unrecognized_format(magic: u8) -> Self {
        Self::UnrecognizedFormat { magic }
    }

    /// Create a corrupt tree error.
    pub fn corrupt_tree(offset: usize, message: impl Into<String>) -> Self {
        Self::CorruptTree {
            offset,
            message: message.into(),
        }
    }

    /// Create a corrupt stream error.
    pub fn corrupt_stream(bit_position: u64) -> Self {
        Self::CorruptStream { bit_position }
    }

    /// Create a truncated input error.
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::TruncatedInput {
            offset,
            needed,
            available,
        }
    }

    /// Create a prefix conflict error.
    pub fn prefix_conflict(code: impl Into<String>) -> Self {
        Self::PrefixConflict { code: code.into() }
    }

    /// Create an output too large error.
    pub fn output_too_large(declared: usize, limit: usize) -> Self {
        Self::OutputTooLarge { declared, limit }
    }

    /// Whether this error means the input simply ran out of bytes.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}
