//! # OxiHuff Codec
//!
//! Pure Rust decoder for HUFF, the packed-tree Huffman format found inside
//! game asset archives.
//!
//! A HUFF entry is a 4-byte header, a packed code tree (led by its size
//! selector), and a bit-packed body:
//!
//! - **8-bit mode** (magic `0x28`): every decoded symbol is one output byte
//! - **4-bit mode** (magic `0x24`): symbols are nibbles, paired high then low
//!
//! Only decompression is provided. Callers strip any outer archive framing
//! and pass the raw entry.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::decompress;
//!
//! // Codes: 0 -> 'a', 10 -> 'b', 11 -> 'c'; body encodes "abcab".
//! let entry = [
//!     0x28, 0x05, 0x00, 0x00, // 8-bit mode, 5 bytes
//!     0x02, 0x80, b'a', 0xC0, b'b', b'c', // packed tree
//!     0x00, 0x00, 0x00, 0x5A, // one little-endian window
//! ];
//!
//! assert_eq!(decompress(&entry).unwrap(), b"abcab");
//! ```
//!
//! ## Inspecting entries
//!
//! ```rust
//! use oxihuff_codec::{BlockMode, HuffHeader};
//!
//! let header = HuffHeader::parse(&[0x24, 0x00, 0x01, 0x00, 0x0F]).unwrap();
//! assert_eq!(header.mode, BlockMode::Nibble);
//! assert_eq!(header.decompressed_len, 256);
//! assert_eq!(header.tree_size(), 32);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod config;
pub mod decode;
pub mod header;
pub mod tree;
pub mod trie;

// Re-exports
pub use batch::decode_batch;
pub use config::HuffConfig;
pub use decode::{DecoderPhase, HuffDecoder, WindowReader};
pub use header::{BlockMode, HuffHeader, is_huff};
pub use oxihuff_core::error::{HuffError, Result};
pub use tree::TreeDecoder;
pub use trie::{BitSource, HuffmanTrie, Node, NodeId};

/// Decompress a HUFF entry with the default configuration.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{HuffError, decompress};
///
/// let err = decompress(&[0x10, 0x00, 0x00, 0x00, 0x00]).unwrap_err();
/// assert_eq!(err, HuffError::UnrecognizedFormat { magic: 0x10 });
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_config(data, &HuffConfig::DEFAULT)
}

/// Decompress a HUFF entry with the given configuration.
pub fn decompress_with_config(data: &[u8], config: &HuffConfig) -> Result<Vec<u8>> {
    let mut decoder = HuffDecoder::new(*config);
    decoder.decode(data)
}
