//! Reference HUFF encoder used to produce fixtures for decoder tests.
//!
//! The tree is laid out breadth-first: the root sits right after the size
//! selector and each internal node's child pair is appended in the order the
//! nodes are visited. That keeps every child offset small for alphabets of up
//! to 64 symbols, which is all the tests need.

#![allow(dead_code)]

use oxihuff_codec::BlockMode;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

enum EncNode {
    Leaf(u8),
    Internal(usize, usize),
}

/// Split input into the symbol sequence for `mode`.
pub fn symbols(data: &[u8], mode: BlockMode) -> Vec<u8> {
    match mode {
        BlockMode::Byte => data.to_vec(),
        BlockMode::Nibble => data.iter().flat_map(|&b| [b >> 4, b & 0x0F]).collect(),
    }
}

/// Build a Huffman tree; returns the arena and the root index.
fn build_tree(symbols: &[u8]) -> (Vec<EncNode>, usize) {
    let mut freq = [0u64; 256];
    for &s in symbols {
        freq[s as usize] += 1;
    }

    let mut nodes = Vec::new();
    let mut heap = BinaryHeap::new();
    for (symbol, &count) in freq.iter().enumerate() {
        if count > 0 {
            heap.push(Reverse((count, nodes.len())));
            nodes.push(EncNode::Leaf(symbol as u8));
        }
    }

    match heap.len() {
        0 => {
            nodes.push(EncNode::Leaf(0));
            nodes.push(EncNode::Leaf(0));
            nodes.push(EncNode::Internal(0, 1));
            return (nodes, 2);
        }
        1 => {
            // A lone symbol still needs an internal root; both branches decode to it.
            let Reverse((_, only)) = heap.pop().expect("one entry");
            let EncNode::Leaf(symbol) = nodes[only] else {
                unreachable!()
            };
            nodes.push(EncNode::Leaf(symbol));
            let root = nodes.len();
            nodes.push(EncNode::Internal(only, root - 1));
            return (nodes, root);
        }
        _ => {}
    }

    while heap.len() > 1 {
        let Reverse((fa, a)) = heap.pop().expect("heap has two entries");
        let Reverse((fb, b)) = heap.pop().expect("heap has two entries");
        heap.push(Reverse((fa + fb, nodes.len())));
        nodes.push(EncNode::Internal(a, b));
    }
    let Reverse((_, root)) = heap.pop().expect("root");
    (nodes, root)
}

/// Serialize the tree region (selector byte included) and collect codes.
fn pack_tree(nodes: &[EncNode], root: usize) -> (Vec<u8>, Vec<Option<(u64, u8)>>) {
    let mut region = vec![0u8; 2];
    let mut codes = vec![None; 256];
    let mut queue = VecDeque::from([(root, 1usize, 0u64, 0u8)]);
    let mut pairs = 0usize;

    while let Some((id, addr, code, len)) = queue.pop_front() {
        let EncNode::Internal(zero, one) = nodes[id] else {
            unreachable!("only internal nodes are queued")
        };

        let pair_addr = 2 + 2 * pairs;
        let offset = (pair_addr - (addr & !1) - 2) / 2;
        assert!(offset <= 0x3F, "child offset {offset} does not fit");
        pairs += 1;
        region.resize(pair_addr + 2, 0);

        let mut descriptor = offset as u8;
        for (bit, child) in [(0u64, zero), (1u64, one)] {
            let child_addr = pair_addr + bit as usize;
            let child_code = (code << 1) | bit;
            match nodes[child] {
                EncNode::Leaf(symbol) => {
                    descriptor |= if bit == 0 { 0x80 } else { 0x40 };
                    region[child_addr] = symbol;
                    if codes[symbol as usize].is_none() {
                        codes[symbol as usize] = Some((child_code, len + 1));
                    }
                }
                EncNode::Internal(..) => queue.push_back((child, child_addr, child_code, len + 1)),
            }
        }
        region[addr] = descriptor;
    }

    assert!(pairs <= 0xFF, "tree too large for the size selector");
    region[0] = (region.len() / 2 - 1) as u8;
    (region, codes)
}

/// MSB-first writer that emits little-endian 32-bit words.
struct WindowWriter {
    out: Vec<u8>,
    word: u32,
    bits: u8,
}

impl WindowWriter {
    fn new() -> Self {
        Self {
            out: Vec::new(),
            word: 0,
            bits: 0,
        }
    }

    fn write(&mut self, code: u64, len: u8) {
        for i in (0..len).rev() {
            let bit = ((code >> i) & 1) as u32;
            self.word |= bit << (31 - self.bits);
            self.bits += 1;
            if self.bits == 32 {
                self.flush_word();
            }
        }
    }

    fn flush_word(&mut self) {
        self.out.extend_from_slice(&self.word.to_le_bytes());
        self.word = 0;
        self.bits = 0;
    }

    fn finish(mut self) -> Vec<u8> {
        if self.bits > 0 {
            self.flush_word();
        }
        self.out
    }
}

/// Encode `data` as a complete HUFF entry.
pub fn encode(data: &[u8], mode: BlockMode) -> Vec<u8> {
    assert!(data.len() <= 0xFF_FFFF, "length does not fit in 24 bits");

    let symbols = symbols(data, mode);
    let (nodes, root) = build_tree(&symbols);
    let (region, codes) = pack_tree(&nodes, root);

    let mut writer = WindowWriter::new();
    for &s in &symbols {
        let (code, len) = codes[s as usize].expect("every symbol has a code");
        writer.write(code, len);
    }

    let len = (data.len() as u32).to_le_bytes();
    let mut entry = vec![mode.magic(), len[0], len[1], len[2]];
    entry.extend_from_slice(&region);
    entry.extend_from_slice(&writer.finish());
    entry
}

/// Deterministic text with a small alphabet.
pub fn sample_text(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. ";
    text.iter().copied().cycle().take(size).collect()
}
