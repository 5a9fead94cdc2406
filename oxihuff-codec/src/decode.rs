//! HUFF stream decoding.
//!
//! Decoding runs through four phases:
//!
//! 1. **ReadHeader**: 4-byte header (magic, declared length) and the
//!    tree-size selector that follows it
//! 2. **ReadTree**: rebuild the trie from the packed tree region
//! 3. **DecodeBody**: walk the trie once per symbol, refilling 32-bit windows
//!    from the body on demand
//! 4. **Done**: the output holds exactly the declared number of bytes
//!
//! Body windows are little-endian 32-bit words whose bits are consumed
//! most-significant first. In nibble mode, the first symbol of each pair is
//! the high half of the output byte.

use crate::config::HuffConfig;
use crate::header::{BlockMode, HuffHeader};
use crate::trie::{BitSource, HuffmanTrie};
use oxihuff_core::error::{HuffError, Result};
use oxihuff_core::traits::{DecompressStatus, Decompressor};
use oxihuff_core::{BitValue, ByteCursor};

/// Width of one body window in bits.
pub const WINDOW_BITS: u8 = 32;

/// Decoder phase, advanced as each stage succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderPhase {
    /// Parsing the 4-byte header and the tree-size selector.
    #[default]
    ReadHeader,
    /// Rebuilding the Huffman trie.
    ReadTree,
    /// Decoding symbols from the body.
    DecodeBody,
    /// Output complete.
    Done,
}

/// Supplies 32-bit body windows from an in-memory buffer.
#[derive(Debug, Clone)]
pub struct WindowReader<'a> {
    cursor: ByteCursor<'a>,
    bits_fetched: u64,
}

impl<'a> WindowReader<'a> {
    /// Create a reader whose first window starts at `offset`.
    pub fn new(data: &'a [u8], offset: usize) -> Self {
        Self {
            cursor: ByteCursor::at(data, offset),
            bits_fetched: 0,
        }
    }

    /// Absolute offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl BitSource for WindowReader<'_> {
    fn next_window(&mut self) -> Result<BitValue> {
        let word = self.cursor.read_u32_le()?;
        self.bits_fetched += u64::from(WINDOW_BITS);
        log::trace!(
            "window {:#010x} at offset {}",
            word,
            self.cursor.position() - 4
        );
        Ok(BitValue::new(u64::from(word), WINDOW_BITS))
    }

    fn bits_fetched(&self) -> u64 {
        self.bits_fetched
    }
}

/// HUFF decompressor.
#[derive(Debug, Default)]
pub struct HuffDecoder {
    /// Decode limits.
    config: HuffConfig,
    /// Current phase.
    phase: DecoderPhase,
    /// Header of the entry being decoded.
    header: Option<HuffHeader>,
    /// Input bytes consumed by the last successful decode.
    consumed: usize,
    /// Decoded bytes not yet handed out through `Decompressor`.
    pending: Vec<u8>,
    /// Bytes of `pending` already copied out.
    emitted: usize,
}

impl HuffDecoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: HuffConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current phase. After a failed decode this is the phase that failed.
    pub fn phase(&self) -> DecoderPhase {
        self.phase
    }

    /// Header of the most recent entry, once parsed.
    pub fn header(&self) -> Option<&HuffHeader> {
        self.header.as_ref()
    }

    /// Input bytes consumed by the most recent successful decode.
    ///
    /// Counts up to the end of the last body window that was read; trailing
    /// bytes after it are not consumed.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Reset the decoder.
    pub fn reset(&mut self) {
        self.phase = DecoderPhase::ReadHeader;
        self.header = None;
        self.consumed = 0;
        self.pending.clear();
        self.emitted = 0;
    }

    /// Decode a complete HUFF entry.
    pub fn decode(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.reset();

        let header = HuffHeader::parse(data)?;
        if header.decompressed_len > self.config.max_output_len {
            return Err(HuffError::output_too_large(
                header.decompressed_len,
                self.config.max_output_len,
            ));
        }
        log::debug!(
            "HUFF header: {:?} mode, {} bytes declared, {}-byte tree",
            header.mode,
            header.decompressed_len,
            header.tree_size()
        );
        self.header = Some(header);
        self.phase = DecoderPhase::ReadTree;

        let region = header.tree_region();
        if data.len() < region.end {
            return Err(HuffError::truncated(
                region.start,
                region.len(),
                data.len().saturating_sub(region.start),
            ));
        }
        let trie = HuffmanTrie::from_packed(data, region)?;
        self.phase = DecoderPhase::DecodeBody;

        let mut reader = WindowReader::new(data, header.body_offset());
        let output = self.decode_body(&trie, &header, &mut reader)?;

        self.consumed = reader.position();
        self.phase = DecoderPhase::Done;
        Ok(output)
    }

    fn decode_body(
        &self,
        trie: &HuffmanTrie,
        header: &HuffHeader,
        reader: &mut WindowReader<'_>,
    ) -> Result<Vec<u8>> {
        let len = header.decompressed_len;
        let mut output = Vec::with_capacity(len);
        let mut pending = BitValue::EMPTY;
        let mut high_nibble: Option<u8> = None;

        while output.len() < len {
            let (symbol, rest) = trie.descend(pending, reader)?;
            pending = rest;

            match header.mode {
                BlockMode::Byte => output.push(symbol),
                BlockMode::Nibble => {
                    if symbol > 0x0F && self.config.strict_nibbles {
                        let position = reader.bits_fetched() - u64::from(pending.width());
                        return Err(HuffError::corrupt_stream(position));
                    }
                    let nibble = symbol & 0x0F;
                    match high_nibble.take() {
                        None => high_nibble = Some(nibble << 4),
                        Some(high) => output.push(high | nibble),
                    }
                }
            }
        }

        log::debug!(
            "decoded {} bytes from {} body bits, {} left unused",
            output.len(),
            reader.bits_fetched(),
            pending.width()
        );
        Ok(output)
    }
}

impl Decompressor for HuffDecoder {
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecompressStatus)> {
        let mut consumed = 0;
        if self.phase != DecoderPhase::Done {
            let decoded = self.decode(input)?;
            self.pending = decoded;
            consumed = self.consumed;
        }

        let remaining = &self.pending[self.emitted..];
        let produced = remaining.len().min(output.len());
        output[..produced].copy_from_slice(&remaining[..produced]);
        self.emitted += produced;

        let status = if self.emitted == self.pending.len() {
            DecompressStatus::Done
        } else {
            DecompressStatus::NeedsOutput
        };
        Ok((consumed, produced, status))
    }

    fn reset(&mut self) {
        HuffDecoder::reset(self);
    }

    fn is_finished(&self) -> bool {
        self.phase == DecoderPhase::Done && self.emitted == self.pending.len()
    }
}
