//! Packed tree region decoding.
//!
//! The HUFF code table is stored as a run of one-byte descriptors. The first
//! byte of the region is the tree-size selector; the root descriptor follows
//! it. An internal descriptor `d` packs:
//!
//! ```text
//!  bit  7   6   5 4 3 2 1 0
//!     ┌───┬───┬─────────────┐
//!     │ L0│ L1│   offset    │
//!     └───┴───┴─────────────┘
//! ```
//!
//! - `offset`: the "0" child lives at `(addr & !1) + offset * 2 + 2` and the
//!   "1" child at the byte right after it
//! - `L0` / `L1`: the "0" / "1" child is a leaf, i.e. a plain symbol byte
//!
//! Children always sit at a higher address than their parent, so decoding
//! terminates. Descriptors pointing past the region produce absent children
//! rather than errors: some archives ship incomplete trees, and only the
//! codes that actually reach a missing child fail (during body decoding).
//!
//! Several descriptors may point at the same child pair. Each region byte is
//! decoded once per role (leaf or internal) and later references reuse that
//! node, so the trie becomes a DAG of at most two nodes per region byte.

use crate::trie::{HuffmanTrie, Node, NodeId};
use oxihuff_core::error::{HuffError, Result};
use std::ops::Range;

/// Mask selecting the child offset in an internal descriptor.
pub const OFFSET_MASK: u8 = 0x3F;

/// Flag: the "0" child is a leaf.
pub const ZERO_IS_LEAF: u8 = 0x80;

/// Flag: the "1" child is a leaf.
pub const ONE_IS_LEAF: u8 = 0x40;

/// Address of the "0" child of the internal descriptor at `addr`.
#[inline]
pub fn zero_child_addr(addr: usize, descriptor: u8) -> usize {
    (addr & !1) + usize::from(descriptor & OFFSET_MASK) * 2 + 2
}

/// Rebuilds a [`HuffmanTrie`] from a packed tree region.
#[derive(Debug)]
pub struct TreeDecoder<'a> {
    data: &'a [u8],
    region: Range<usize>,
    nodes: Vec<Node>,
    /// Node built for each region byte, as `[internal, leaf]`.
    built: Vec<[Option<NodeId>; 2]>,
    dropped: usize,
}

impl<'a> TreeDecoder<'a> {
    /// Create a decoder over `data[region]`.
    ///
    /// Addresses stay absolute offsets into `data`. The region end is clamped
    /// to the length of `data`.
    pub fn new(data: &'a [u8], region: Range<usize>) -> Self {
        let end = region.end.min(data.len());
        let region = region.start..end.max(region.start);
        Self {
            data,
            built: vec![[None; 2]; region.len()],
            region,
            nodes: Vec::new(),
            dropped: 0,
        }
    }

    /// Decode the whole tree, rooted just after the size selector byte.
    pub fn decode(mut self) -> Result<HuffmanTrie> {
        let root_addr = self.region.start + 1;
        let (root, _) = self.decode_node(root_addr, false)?;
        let root = root.ok_or_else(|| {
            HuffError::corrupt_tree(root_addr, "tree region holds no root descriptor")
        })?;

        log::debug!(
            "decoded Huffman tree: region {:?}, {} nodes, {} out-of-region children dropped",
            self.region,
            self.nodes.len(),
            self.dropped
        );

        Ok(HuffmanTrie::from_parts(self.nodes, root))
    }

    /// Number of children dropped because they pointed outside the region.
    pub fn dropped_children(&self) -> usize {
        self.dropped
    }

    /// Decode the node whose byte sits at `addr`.
    ///
    /// Returns the node id (or `None` if `addr` lies outside the region) and
    /// the address a structural scan should resume at, `addr + 1`. A byte
    /// already decoded in the same role returns its existing node.
    pub fn decode_node(&mut self, addr: usize, is_leaf: bool) -> Result<(Option<NodeId>, usize)> {
        let resume = addr + 1;
        if addr < self.region.start || addr >= self.region.end {
            return Ok((None, resume));
        }

        let slot = addr - self.region.start;
        let role = usize::from(is_leaf);
        if let Some(id) = self.built[slot][role] {
            return Ok((Some(id), resume));
        }

        let byte = self.data[addr];
        let id = if is_leaf {
            self.push(Node::Leaf(byte))
        } else {
            let child_addr = zero_child_addr(addr, byte);
            let zero = self.decode_child(child_addr, byte & ZERO_IS_LEAF != 0)?;
            let one = self.decode_child(child_addr + 1, byte & ONE_IS_LEAF != 0)?;
            self.push(Node::Internal { zero, one })
        };
        self.built[slot][role] = Some(id);

        Ok((Some(id), resume))
    }

    fn decode_child(&mut self, addr: usize, is_leaf: bool) -> Result<Option<NodeId>> {
        let (child, _) = self.decode_node(addr, is_leaf)?;
        if child.is_none() {
            self.dropped += 1;
            log::trace!("child descriptor at {addr} lies outside tree region {:?}", self.region);
        }
        Ok(child)
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

impl HuffmanTrie {
    /// Decode a trie from the packed tree region `data[region]`.
    pub fn from_packed(data: &[u8], region: Range<usize>) -> Result<Self> {
        TreeDecoder::new(data, region).decode()
    }
}
