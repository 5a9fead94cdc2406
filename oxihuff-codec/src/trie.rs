//! Arena-indexed Huffman trie.
//!
//! Nodes live in a flat `Vec` and refer to their children by index. Decoding
//! only ever walks from the root to a leaf, so nodes carry no parent or depth
//! links; the trie is built once and read-only afterwards.
//!
//! Walking consumes bits most-significant first: a `0` bit selects the
//! `zero` child, a `1` bit the `one` child. When the pending bits run out
//! mid-code, more are pulled from a [`BitSource`], so a code may straddle a
//! window boundary.

use oxihuff_core::BitValue;
use oxihuff_core::error::{HuffError, Result};

/// Index of a node inside a [`HuffmanTrie`].
pub type NodeId = usize;

/// A trie node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// An internal node with up to two children.
    Internal {
        /// Child reached by a `0` bit.
        zero: Option<NodeId>,
        /// Child reached by a `1` bit.
        one: Option<NodeId>,
    },
    /// A leaf holding a decoded symbol.
    Leaf(u8),
}

impl Node {
    /// An internal node without children.
    pub const EMPTY: Node = Node::Internal {
        zero: None,
        one: None,
    };

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// The child selected by `bit`, if any. Leaves have no children.
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        match *self {
            Node::Internal { zero, one } => {
                if bit {
                    one
                } else {
                    zero
                }
            }
            Node::Leaf(_) => None,
        }
    }
}

/// Pull-based supply of 32-bit windows for trie descent.
pub trait BitSource {
    /// Fetch the next window of bits.
    fn next_window(&mut self) -> Result<BitValue>;

    /// Total bits handed out so far, for error positions.
    ///
    /// The default reports `0`. Closure sources use it, so they do not track
    /// position: a [`HuffError::CorruptStream`] raised while walking from a
    /// closure carries `bit_position: 0`. Implement the trait directly (as
    /// [`WindowReader`](crate::decode::WindowReader) does) to get real offsets.
    fn bits_fetched(&self) -> u64 {
        0
    }
}

impl<F> BitSource for F
where
    F: FnMut() -> Result<BitValue>,
{
    fn next_window(&mut self) -> Result<BitValue> {
        self()
    }
}

/// A Huffman code table stored as a binary trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTrie {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTrie {
    /// Assemble a trie from an arena built elsewhere in the crate.
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        debug_assert!(root < nodes.len());
        Self { nodes, root }
    }

    /// Build a trie from explicit `(code, symbol)` pairs.
    ///
    /// Each code is read most-significant bit first. An empty code makes the
    /// root itself a leaf. Codes that run through an existing leaf, or end on
    /// a node that already has children or a symbol, are rejected with
    /// [`HuffError::PrefixConflict`].
    pub fn from_codes<I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (BitValue, u8)>,
    {
        let mut nodes = vec![Node::EMPTY];

        for (code, symbol) in codes {
            let mut current = 0;
            let mut rest = code;

            while !rest.is_empty() {
                let (bit, tail) = rest.split_msb();
                let (zero, one) = match nodes[current] {
                    Node::Internal { zero, one } => (zero, one),
                    Node::Leaf(_) => return Err(HuffError::prefix_conflict(code.to_string())),
                };
                let selected = if bit { one } else { zero };
                let next = match selected {
                    Some(id) => id,
                    None => {
                        let id = nodes.len();
                        nodes.push(Node::EMPTY);
                        nodes[current] = if bit {
                            Node::Internal {
                                zero,
                                one: Some(id),
                            }
                        } else {
                            Node::Internal {
                                zero: Some(id),
                                one,
                            }
                        };
                        id
                    }
                };
                current = next;
                rest = tail;
            }

            if nodes[current] != Node::EMPTY {
                return Err(HuffError::prefix_conflict(code.to_string()));
            }
            nodes[current] = Node::Leaf(symbol);
        }

        Ok(Self { nodes, root: 0 })
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct leaves reachable from the root.
    pub fn leaf_count(&self) -> usize {
        self.reachable()
            .into_iter()
            .filter(|&id| self.nodes[id].is_leaf())
            .count()
    }

    /// Length of the longest root-to-node path, in bits.
    pub fn max_depth(&self) -> usize {
        let mut height: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut stack = vec![(self.root, false)];

        while let Some((id, expanded)) = stack.pop() {
            if height[id].is_some() {
                continue;
            }
            let Node::Internal { zero, one } = self.nodes[id] else {
                height[id] = Some(0);
                continue;
            };
            let children = [zero, one].into_iter().flatten();
            if expanded {
                let h = children.filter_map(|c| height[c]).map(|h| h + 1).max();
                height[id] = Some(h.unwrap_or(0));
            } else {
                stack.push((id, true));
                stack.extend(children.filter(|&c| height[c].is_none()).map(|c| (c, false)));
            }
        }

        height[self.root].unwrap_or(0)
    }

    /// The code table as `(code, symbol)` pairs.
    ///
    /// Leaves are listed depth-first with the `0` branch before the `1`
    /// branch. Leaves deeper than [`BitValue::MAX_WIDTH`] cannot be expressed
    /// as a code and are left out.
    ///
    /// There is one entry per root-to-leaf path, so a leaf shared by several
    /// parents (see [`HuffmanTrie::from_packed`]) is listed once per path.
    pub fn codes(&self) -> Vec<(BitValue, u8)> {
        let mut out = Vec::new();
        let mut stack = vec![(self.root, BitValue::EMPTY)];

        while let Some((id, prefix)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf(symbol) => out.push((prefix, symbol)),
                Node::Internal { zero, one } => {
                    if prefix.width() == BitValue::MAX_WIDTH {
                        continue;
                    }
                    if let Some(one) = one {
                        stack.push((one, prefix.concat(BitValue::ONE)));
                    }
                    if let Some(zero) = zero {
                        stack.push((zero, prefix.concat(BitValue::ZERO)));
                    }
                }
            }
        }

        out
    }

    /// Decode one symbol, pulling windows from `source` as needed.
    ///
    /// Returns the symbol and the bits of `pending` (plus any fetched window)
    /// that the code did not use.
    pub fn descend<S>(&self, mut pending: BitValue, source: &mut S) -> Result<(u8, BitValue)>
    where
        S: BitSource + ?Sized,
    {
        let mut current = self.root;

        loop {
            let node = self.nodes[current];
            if let Node::Leaf(symbol) = node {
                return Ok((symbol, pending));
            }

            if pending.is_empty() {
                pending = pending.concat(source.next_window()?);
                if pending.is_empty() {
                    return Err(HuffError::corrupt_stream(source.bits_fetched()));
                }
            }

            let position = source
                .bits_fetched()
                .saturating_sub(u64::from(pending.width()));
            let (bit, rest) = pending.split_msb();
            current = node
                .child(bit)
                .ok_or_else(|| HuffError::corrupt_stream(position))?;
            pending = rest;
        }
    }

    /// Decode one symbol from a fixed key, without refilling.
    ///
    /// Running out of key bits before reaching a leaf is reported as
    /// [`HuffError::TruncatedInput`].
    pub fn lookup(&self, key: BitValue) -> Result<(u8, BitValue)> {
        let mut exhausted = || -> Result<BitValue> { Err(HuffError::truncated(0, 1, 0)) };
        self.descend(key, &mut exhausted)
    }

    /// Every node reachable from the root, each listed once.
    fn reachable(&self) -> Vec<NodeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id], true) {
                continue;
            }
            order.push(id);
            if let Node::Internal { zero, one } = self.nodes[id] {
                stack.extend(zero);
                stack.extend(one);
            }
        }

        order
    }
}
