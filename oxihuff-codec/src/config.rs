//! Decode configuration.

use crate::header::MAX_DECLARED_LEN;

/// HUFF decode parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffConfig {
    /// Largest declared output length accepted before any allocation.
    pub max_output_len: usize,
    /// In nibble mode, reject symbols above `0x0F` instead of masking them.
    pub strict_nibbles: bool,
}

impl HuffConfig {
    /// Accept anything the header can express.
    ///
    /// - up to 16 MiB - 1 of output (the 24-bit header maximum)
    /// - nibble symbols masked to their low four bits
    pub const DEFAULT: Self = Self {
        max_output_len: MAX_DECLARED_LEN,
        strict_nibbles: false,
    };

    /// Reject out-of-range nibble symbols as stream corruption.
    pub const STRICT: Self = Self {
        max_output_len: MAX_DECLARED_LEN,
        strict_nibbles: true,
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the output length limit.
    pub fn with_max_output_len(mut self, max_output_len: usize) -> Self {
        self.max_output_len = max_output_len;
        self
    }

    /// Enable or disable strict nibble checking.
    pub fn with_strict_nibbles(mut self, strict: bool) -> Self {
        self.strict_nibbles = strict;
        self
    }
}

impl Default for HuffConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
