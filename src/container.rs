//! Container header layout
//!
//! ```text
//! [4 bytes]  magic "HUFZ"              (framed format only)
//! [1 byte]   format version            (framed format only)
//! [8 bytes]  original size             u64 little-endian
//! [4 bytes]  distinct symbol count     u32 little-endian
//! repeat count times, ascending symbol order:
//!   [1 byte]  symbol
//!   [8 bytes] frequency                u64 little-endian
//! [variable] bit-packed codes, MSB-first, zero-padded to a byte
//! ```

use crate::config::ContainerFormat;
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use std::io::{self, Write};

pub const MAGIC: [u8; 4] = *b"HUFZ";
pub const FORMAT_VERSION: u8 = 1;

const PREAMBLE_LEN: usize = MAGIC.len() + 1;
const FIXED_HEADER_LEN: usize = 8 + 4;
const PAIR_LEN: usize = 1 + 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub original_size: u64,
    pub frequencies: FrequencyTable,
}

impl Header {
    pub fn new(frequencies: FrequencyTable) -> Self {
        Self {
            original_size: frequencies.total(),
            frequencies,
        }
    }

    /// Serialized size of this header in bytes.
    pub fn encoded_len(&self, format: ContainerFormat) -> usize {
        let preamble = match format {
            ContainerFormat::Framed => PREAMBLE_LEN,
            ContainerFormat::Legacy => 0,
        };
        preamble + FIXED_HEADER_LEN + self.frequencies.distinct() * PAIR_LEN
    }

    pub fn write_to<W: Write>(&self, format: ContainerFormat, mut sink: W) -> io::Result<()> {
        if format == ContainerFormat::Framed {
            sink.write_all(&MAGIC)?;
            sink.write_all(&[FORMAT_VERSION])?;
        }
        sink.write_all(&self.original_size.to_le_bytes())?;
        sink.write_all(&(self.frequencies.distinct() as u32).to_le_bytes())?;
        for (symbol, freq) in self.frequencies.symbols() {
            sink.write_all(&[symbol])?;
            sink.write_all(&freq.to_le_bytes())?;
        }
        Ok(())
    }

    /// Parse and validate a header, returning it with the remaining body bytes.
    pub fn parse(format: ContainerFormat, data: &[u8]) -> Result<(Header, &[u8])> {
        let mut input = Input { data, pos: 0 };

        if format == ContainerFormat::Framed {
            let magic = input.take(MAGIC.len(), "magic")?;
            if magic != MAGIC {
                return Err(CompressError::malformed("not a huffpack container (bad magic)"));
            }
            let version = input.take(1, "format version")?[0];
            if version != FORMAT_VERSION {
                return Err(CompressError::malformed(format!(
                    "unsupported format version {version}"
                )));
            }
        }

        let original_size = input.u64("original size")?;
        let count = input.u32("symbol count")? as usize;
        if count == 0 || count > 256 {
            return Err(CompressError::malformed(format!(
                "symbol count {count} outside 1..=256"
            )));
        }

        let mut pairs = Vec::with_capacity(count);
        for _ in 0..count {
            let symbol = input.take(1, "symbol")?[0];
            let freq = input.u64("frequency")?;
            pairs.push((symbol, freq));
        }
        let frequencies = FrequencyTable::from_pairs(pairs)?;
        if frequencies.total() != original_size {
            return Err(CompressError::malformed(format!(
                "frequencies sum to {} but original size is {}",
                frequencies.total(),
                original_size
            )));
        }

        Ok((
            Header {
                original_size,
                frequencies,
            },
            &data[input.pos..],
        ))
    }
}

struct Input<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Input<'a> {
    fn take(&mut self, n: usize, field: &str) -> Result<&'a [u8]> {
        let end = self.pos + n;
        let bytes = self.data.get(self.pos..end).ok_or_else(|| {
            CompressError::malformed(format!("header ends before {field} at offset {}", self.pos))
        })?;
        self.pos = end;
        Ok(bytes)
    }

    fn u64(&mut self, field: &str) -> Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8, field)?);
        Ok(u64::from_le_bytes(buf))
    }

    fn u32(&mut self, field: &str) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4, field)?);
        Ok(u32::from_le_bytes(buf))
    }
}
