//! MSB-first bit packing on top of `bitstream-io`.

use crate::code_table::Code;
use bitstream_io::{BigEndian, BitRead, BitWrite};
use std::io::{self, Read, Write};

/// Packs bits most-significant first into a byte sink.
pub struct BitWriter<W: Write> {
    inner: bitstream_io::BitWriter<W, BigEndian>,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            inner: bitstream_io::BitWriter::endian(sink, BigEndian),
            bits_written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.inner.write_bit(bit)?;
        self.bits_written += 1;
        Ok(())
    }

    pub fn write_code(&mut self, code: &Code) -> io::Result<()> {
        for bit in code.bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Zero-pad the final partial byte, emit it and hand back the sink.
    pub fn flush(mut self) -> io::Result<W> {
        self.inner.byte_align()?;
        let mut sink = self.inner.into_writer();
        sink.flush()?;
        Ok(sink)
    }
}

/// Reads bits most-significant first from a byte source.
pub struct BitReader<R: Read> {
    inner: bitstream_io::BitReader<R, BigEndian>,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            inner: bitstream_io::BitReader::endian(source, BigEndian),
        }
    }

    /// Next bit, or `None` once the source is exhausted.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        match self.inner.read_bit() {
            Ok(bit) => Ok(Some(bit)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Discard any unread bits of the current byte and return the source.
    pub fn into_inner(self) -> R {
        self.inner.into_reader()
    }
}
