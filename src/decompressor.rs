//! Decompression: rebuild the tree from the stored header and walk it bit by bit.

use crate::bitstream::BitReader;
use crate::config::CodecConfig;
use crate::container::Header;
use crate::error::{CompressError, Result};
use crate::huffman::{HuffmanTree, Node};
use std::io::{Cursor, Read};
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct Decompressor {
    config: CodecConfig,
}

impl Decompressor {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn decompress(&self, container: &[u8]) -> Result<Vec<u8>> {
        let (header, body) = Header::parse(self.config.format, container).map_err(|e| {
            warn!(error = %e, "rejected container header");
            e
        })?;
        let expected = header.original_size;
        if expected > self.config.max_input_size {
            return Err(CompressError::InputTooLarge {
                size: expected,
                limit: self.config.max_input_size,
            });
        }

        let tree = HuffmanTree::build(&header.frequencies, self.config.format.merge_order())?;

        // Every symbol costs at least one bit.
        let capacity = expected.min(body.len() as u64 * 8) as usize;
        let mut output = Vec::with_capacity(capacity);
        let mut reader = BitReader::new(Cursor::new(body));
        while (output.len() as u64) < expected {
            match decode_symbol(&tree, &mut reader)? {
                Some(symbol) => output.push(symbol),
                None => {
                    return Err(CompressError::TruncatedStream {
                        decoded: output.len() as u64,
                        expected,
                    })
                }
            }
        }

        let consumed = reader.into_inner().position();
        if consumed < body.len() as u64 {
            return Err(CompressError::malformed(format!(
                "{} trailing bytes after body",
                body.len() as u64 - consumed
            )));
        }

        info!(bytes = expected, "decompressed");
        Ok(output)
    }
}

/// Walk from the root to a leaf. A lone-leaf tree still consumes one bit.
/// Returns `None` if the bits run out first.
fn decode_symbol<R: Read>(tree: &HuffmanTree, reader: &mut BitReader<R>) -> Result<Option<u8>> {
    let mut id = tree.root();
    loop {
        let Some(bit) = reader.read_bit()? else {
            return Ok(None);
        };
        if let Some(next) = tree.step(id, bit) {
            id = next;
        }
        if let Node::Leaf { symbol, .. } = *tree.node(id) {
            return Ok(Some(symbol));
        }
    }
}
