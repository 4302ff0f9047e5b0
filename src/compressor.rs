//! Compression pipeline: count, build, assign codes, write header and body.

use crate::bitstream::BitWriter;
use crate::config::CodecConfig;
use crate::container::Header;
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use crate::huffman::HuffmanTree;
use std::io::Write;
use tracing::{debug, info};

/// Summary of one compression run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub original_size: u64,
    pub compressed_size: u64,
    pub header_size: u64,
    pub body_bits: u64,
    pub distinct_symbols: usize,
    pub max_code_len: usize,
    pub entropy_bits: f64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CodecConfig,
}

impl Compressor {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Compress `data` into an in-memory container.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.compress_to(data, &mut out)?;
        Ok(out)
    }

    /// Compress `data`, writing the container to `sink`.
    ///
    /// The body is emitted a byte at a time, so unbuffered sinks should be
    /// wrapped in a `BufWriter`.
    pub fn compress_to<W: Write>(&self, data: &[u8], mut sink: W) -> Result<CompressionReport> {
        let size = data.len() as u64;
        if size > self.config.max_input_size {
            return Err(CompressError::InputTooLarge {
                size,
                limit: self.config.max_input_size,
            });
        }

        let freq = FrequencyTable::from_bytes(data)?;
        let tree = HuffmanTree::build(&freq, self.config.format.merge_order())?;
        let codes = tree.code_table();
        debug!(
            distinct = freq.distinct(),
            max_code_len = codes.max_code_len(),
            body_bits = codes.encoded_bits(&freq),
            "code table ready"
        );

        let header = Header::new(freq);
        header.write_to(self.config.format, &mut sink)?;

        let mut writer = BitWriter::new(sink);
        for &b in data {
            // Every byte of `data` was counted, so every byte has a code.
            let code = codes.get(b).ok_or_else(|| {
                CompressError::malformed(format!("no code for byte {b:#04x}"))
            })?;
            writer.write_code(code)?;
        }
        let body_bits = writer.bits_written();
        writer.flush()?;

        let header_size = header.encoded_len(self.config.format) as u64;
        let compressed_size = header_size + (body_bits + 7) / 8;
        let report = CompressionReport {
            original_size: size,
            compressed_size,
            header_size,
            body_bits,
            distinct_symbols: header.frequencies.distinct(),
            max_code_len: codes.max_code_len(),
            entropy_bits: header.frequencies.entropy_bits(),
            ratio: compressed_size as f64 / size as f64,
        };
        info!(
            original = report.original_size,
            compressed = report.compressed_size,
            "compressed"
        );
        Ok(report)
    }
}
