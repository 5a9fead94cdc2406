//! # OxiHuff Core
//!
//! Core components for the OxiHuff HUFF decoder.
//!
//! This crate provides the building blocks the codec is assembled from:
//!
//! - [`bits`]: width-carrying bit values for MSB-first code walking
//! - [`cursor`]: bounds-checked little-endian byte reads
//! - [`traits`]: the decompressor interface shared with archive handlers
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Collaborators                                           │
//! │     archive extraction, script transcoding, previews    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec (oxihuff-codec)                                   │
//! │     HUFF header, packed tree, trie, stream decoder      │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     BitValue, ByteCursor, Decompressor, HuffError       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bits::BitValue;
//! use oxihuff_core::cursor::ByteCursor;
//!
//! let data = [0x78, 0x56, 0x34, 0x12];
//! let mut cursor = ByteCursor::new(&data);
//! let window = BitValue::new(u64::from(cursor.read_u32_le().unwrap()), 32);
//!
//! assert_eq!(window.value(), 0x12345678);
//! assert!(!window.msb());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bits;
pub mod cursor;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use bits::BitValue;
pub use cursor::ByteCursor;
pub use error::{HuffError, Result};
pub use traits::{DecompressStatus, Decompressor};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bits::BitValue;
    pub use crate::cursor::ByteCursor;
    pub use crate::error::{HuffError, Result};
    pub use crate::traits::{DecompressStatus, Decompressor};
}
