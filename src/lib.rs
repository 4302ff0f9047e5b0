//! huffpack: lossless static Huffman compression.
//!
//! The pipeline is:
//! - frequency analysis of the whole input
//! - deterministic Huffman tree construction
//! - code assignment from leaf paths
//! - a little-endian container header followed by an MSB-first packed body
//!
//! The decompressor rebuilds the exact same tree from the stored frequencies,
//! so no code table is stored in the container.

pub mod bitstream;
pub mod code_table;
pub mod compressor;
pub mod config;
pub mod container;
pub mod decompressor;
pub mod error;
pub mod frequency;
pub mod huffman;
mod legacy_heap;

pub use crate::compressor::{CompressionReport, Compressor};
pub use crate::config::{CodecConfig, ContainerFormat};
pub use crate::decompressor::Decompressor;
pub use crate::error::{CompressError, Result};

/// Compress with the default configuration.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Compressor::default().compress(data)
}

/// Decompress a container written with the default configuration.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    Decompressor::default().decompress(container)
}
