//! Byte frequency analysis

use crate::error::{CompressError, Result};

/// Occurrence counts for every byte value.
///
/// The sum of all counts always equals [`FrequencyTable::total`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    total: u64,
}

impl FrequencyTable {
    /// Count every byte of `data`. Fails on empty input.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(CompressError::EmptyInput);
        }
        let mut counts = [0u64; 256];
        for &b in data {
            counts[b as usize] += 1;
        }
        Ok(Self {
            counts,
            total: data.len() as u64,
        })
    }

    /// Rebuild a table from stored `(symbol, frequency)` pairs.
    ///
    /// Every symbol may appear once and every frequency must be non-zero.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; 256];
        let mut total = 0u64;
        for (symbol, freq) in pairs {
            if freq == 0 {
                return Err(CompressError::malformed(format!(
                    "symbol {symbol:#04x} has zero frequency"
                )));
            }
            if counts[symbol as usize] != 0 {
                return Err(CompressError::malformed(format!(
                    "symbol {symbol:#04x} listed twice"
                )));
            }
            counts[symbol as usize] = freq;
            total = total
                .checked_add(freq)
                .ok_or_else(|| CompressError::malformed("frequency total overflows u64"))?;
        }
        if total == 0 {
            return Err(CompressError::malformed("no symbols in frequency table"));
        }
        Ok(Self { counts, total })
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of byte values with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Non-zero entries in ascending symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// Shannon entropy in bits per byte
    pub fn entropy_bits(&self) -> f64 {
        let len = self.total as f64;
        let mut entropy = 0.0;
        for (_, f) in self.symbols() {
            let p = f as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}
