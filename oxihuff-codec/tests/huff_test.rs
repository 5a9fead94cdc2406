//! HUFF decoder integration tests.
//!
//! Fixtures are produced by the reference encoder in `common`, then decoded
//! through the public API.

mod common;

use common::{encode, sample_text};
use oxihuff_codec::{
    BlockMode, HuffConfig, HuffDecoder, HuffError, HuffHeader, HuffmanTrie, decode_batch,
    decompress, decompress_with_config,
};
use oxihuff_core::traits::{DecompressStatus, Decompressor};

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_roundtrip_byte_mode_text() {
    let original = sample_text(1000);
    let entry = encode(&original, BlockMode::Byte);
    assert!(entry.len() < original.len(), "text should compress");

    let decoded = decompress(&entry).expect("decompression failed");
    assert_eq!(decoded, original);
}

#[test]
fn test_roundtrip_nibble_mode_text() {
    let original = sample_text(777);
    let entry = encode(&original, BlockMode::Nibble);

    let decoded = decompress(&entry).expect("decompression failed");
    assert_eq!(decoded, original);
}

#[test]
fn test_roundtrip_nibble_mode_binary() {
    // Every byte value, so all 16 nibbles appear in both halves.
    let original: Vec<u8> = (0..=255).collect();
    let entry = encode(&original, BlockMode::Nibble);

    assert_eq!(decompress(&entry).expect("decompression failed"), original);
}

#[test]
fn test_roundtrip_single_symbol() {
    let original = vec![b'Z'; 100];
    let entry = encode(&original, BlockMode::Byte);
    assert_eq!(decompress(&entry).expect("decompression failed"), original);
}

#[test]
fn test_roundtrip_empty() {
    for mode in [BlockMode::Byte, BlockMode::Nibble] {
        let entry = encode(&[], mode);
        // No body words at all.
        assert_eq!(entry.len(), HuffHeader::parse(&entry).unwrap().body_offset());
        assert!(decompress(&entry).expect("decompression failed").is_empty());
    }
}

#[test]
fn test_roundtrip_sizes() {
    for size in [1, 2, 3, 31, 32, 33, 64, 255, 4096] {
        let original = sample_text(size);
        for mode in [BlockMode::Byte, BlockMode::Nibble] {
            let entry = encode(&original, mode);
            let decoded = decompress(&entry)
                .unwrap_or_else(|e| panic!("size {size}, {mode:?}: {e}"));
            assert_eq!(decoded, original, "size {size}, {mode:?}");
        }
    }
}

// ============================================================================
// Header and tree
// ============================================================================

#[test]
fn test_encoded_header_fields() {
    let original = sample_text(300);
    let entry = encode(&original, BlockMode::Nibble);
    let header = HuffHeader::parse(&entry).expect("header");

    assert_eq!(header.mode, BlockMode::Nibble);
    assert_eq!(header.decompressed_len, 300);
    assert!(header.body_offset() < entry.len());
}

#[test]
fn test_decoded_tree_is_prefix_free() {
    let original = sample_text(2000);
    let entry = encode(&original, BlockMode::Byte);
    let header = HuffHeader::parse(&entry).expect("header");
    let trie = HuffmanTrie::from_packed(&entry, header.tree_region()).expect("tree");

    let codes = trie.codes();
    let mut symbols: Vec<u8> = codes.iter().map(|&(_, s)| s).collect();
    symbols.sort_unstable();
    symbols.dedup();
    assert_eq!(symbols.len(), codes.len(), "each symbol has one code");

    let mut expected: Vec<u8> = original.clone();
    expected.sort_unstable();
    expected.dedup();
    assert_eq!(symbols, expected);

    for (i, (a, _)) in codes.iter().enumerate() {
        for (b, _) in codes.iter().skip(i + 1) {
            let (short, long) = if a.width() <= b.width() { (a, b) } else { (b, a) };
            let head = long.shr(long.width() - short.width());
            assert!(!short.matches(&head), "{short} is a prefix of {long}");
        }
    }
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_body_one_byte_short() {
    let original = sample_text(500);
    let mut entry = encode(&original, BlockMode::Byte);
    entry.pop();

    let err = decompress(&entry).unwrap_err();
    assert!(
        matches!(err, HuffError::TruncatedInput { needed: 4, available: 3, .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn test_declared_length_beyond_body() {
    let original = sample_text(64);
    let mut entry = encode(&original, BlockMode::Byte);
    // Claim far more output than the body can produce.
    entry[1] = 0xFF;
    entry[2] = 0xFF;

    assert!(decompress(&entry).unwrap_err().is_truncation());
}

#[test]
fn test_unrecognized_magic() {
    let mut entry = encode(b"hello", BlockMode::Byte);
    entry[0] = 0x40;
    assert_eq!(
        decompress(&entry).unwrap_err(),
        HuffError::UnrecognizedFormat { magic: 0x40 }
    );
}

#[test]
fn test_mangled_tree_never_panics() {
    let original = sample_text(200);
    let entry = encode(&original, BlockMode::Byte);
    let region = HuffHeader::parse(&entry).expect("header").tree_region();

    for addr in region.start + 1..region.end {
        for value in [0x00, 0x3F, 0x7F, 0xBF, 0xFF, entry[addr] ^ 0x3F] {
            let mut mangled = entry.clone();
            mangled[addr] = value;
            match decompress(&mangled) {
                Ok(decoded) => assert_eq!(decoded.len(), original.len()),
                Err(
                    HuffError::CorruptStream { .. }
                    | HuffError::CorruptTree { .. }
                    | HuffError::TruncatedInput { .. },
                ) => {}
                Err(other) => panic!("unexpected error at {addr}: {other}"),
            }
        }
    }
}

#[test]
fn test_config_limit() {
    let original = sample_text(100);
    let entry = encode(&original, BlockMode::Byte);
    let config = HuffConfig::DEFAULT.with_max_output_len(99);

    assert_eq!(
        decompress_with_config(&entry, &config),
        Err(HuffError::OutputTooLarge {
            declared: 100,
            limit: 99
        })
    );
}

// ============================================================================
// Decoder API
// ============================================================================

#[test]
fn test_decoder_reuse() {
    let mut decoder = HuffDecoder::new(HuffConfig::DEFAULT);
    let first = sample_text(120);
    let second = b"abracadabra".to_vec();

    assert_eq!(decoder.decode(&encode(&first, BlockMode::Byte)).unwrap(), first);
    assert_eq!(
        decoder.decode(&encode(&second, BlockMode::Nibble)).unwrap(),
        second
    );
    assert_eq!(decoder.header().map(|h| h.mode), Some(BlockMode::Nibble));
}

#[test]
fn test_decompressor_small_output_buffer() {
    let original = sample_text(100);
    let entry = encode(&original, BlockMode::Byte);
    let mut decoder = HuffDecoder::new(HuffConfig::DEFAULT);

    let mut output = Vec::new();
    let mut chunk = [0u8; 7];
    let mut input: &[u8] = &entry;
    loop {
        let (consumed, produced, status) = decoder
            .decompress(input, &mut chunk)
            .expect("decompress failed");
        input = &input[consumed..];
        output.extend_from_slice(&chunk[..produced]);
        if status == DecompressStatus::Done {
            break;
        }
    }

    assert_eq!(output, original);
    assert!(decoder.is_finished());
}

#[test]
fn test_decode_batch() {
    let inputs = [sample_text(10), sample_text(500), b"xyz".to_vec()];
    let mut entries: Vec<Vec<u8>> = inputs
        .iter()
        .map(|data| encode(data, BlockMode::Byte))
        .collect();
    entries.push(vec![0x00, 0x00]);

    let results = decode_batch(&entries, &HuffConfig::DEFAULT);
    assert_eq!(results.len(), 4);
    for (result, original) in results.iter().zip(&inputs) {
        assert_eq!(result.as_ref().expect("entry decodes"), original);
    }
    assert!(results[3].is_err());
}
