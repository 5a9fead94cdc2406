//! Decoding many independent entries.
//!
//! Entries share no state, so with the `parallel` feature they are decoded
//! on the rayon thread pool. Results keep input order and each entry fails
//! on its own, letting an extractor skip unreadable entries.

use crate::config::HuffConfig;
use crate::decode::HuffDecoder;
use oxihuff_core::error::Result;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Decode every entry, returning one result per entry in input order.
#[cfg(feature = "parallel")]
pub fn decode_batch<T>(entries: &[T], config: &HuffConfig) -> Vec<Result<Vec<u8>>>
where
    T: AsRef<[u8]> + Sync,
{
    entries
        .par_iter()
        .map(|entry| HuffDecoder::new(*config).decode(entry.as_ref()))
        .collect()
}

/// Decode every entry, returning one result per entry in input order.
#[cfg(not(feature = "parallel"))]
pub fn decode_batch<T>(entries: &[T], config: &HuffConfig) -> Vec<Result<Vec<u8>>>
where
    T: AsRef<[u8]> + Sync,
{
    let mut decoder = HuffDecoder::new(*config);
    entries
        .iter()
        .map(|entry| decoder.decode(entry.as_ref()))
        .collect()
}
