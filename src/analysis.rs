//! Size figures for a code table, computed from counts alone.

use serde::Serialize;

use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Number of bits encoding the counted text would produce.
///
/// Symbols counted zero times contribute nothing and need no code; any other
/// symbol without a code is an error, as it would be for `encode`.
pub fn encoded_bit_length(frequencies: &FrequencyTable, table: &CodeTable) -> Result<u64> {
    frequencies
        .iter()
        .filter(|&(_, count)| count > 0)
        .try_fold(0u64, |acc, (symbol, count)| {
            let len = table
                .code_len(symbol)
                .ok_or(HuffmanError::UnknownSymbol(symbol))?;
            count
                .checked_mul(len as u64)
                .and_then(|bits| acc.checked_add(bits))
                .ok_or(HuffmanError::Overflow)
        })
}

/// Bits per symbol of a fixed-length code for `distinct` symbols.
pub fn fixed_code_width(distinct: usize) -> u32 {
    match distinct {
        0 => 0,
        1 => 1,
        n => usize::BITS - (n - 1).leading_zeros(),
    }
}

pub fn fixed_length_bits(symbol_count: u64, distinct: usize) -> u64 {
    symbol_count.saturating_mul(u64::from(fixed_code_width(distinct)))
}

/// How much smaller `b` is than `a`, as a percentage of `a`.
pub fn percent_diff(a: u64, b: u64) -> f64 {
    if a == 0 {
        return 0.0;
    }
    (a as f64 - b as f64) / a as f64 * 100.0
}

/// Huffman size of a counted text set against the fixed-length baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub symbol_count: u64,
    pub distinct: usize,
    pub huffman_bits: u64,
    pub fixed_width: u32,
    pub fixed_bits: u64,
    pub saved_bits: i128,
    pub saved_percent: f64,
}

impl Comparison {
    pub fn measure(frequencies: &FrequencyTable, table: &CodeTable) -> Result<Self> {
        let symbol_count = frequencies.total();
        let distinct = frequencies.iter().filter(|&(_, count)| count > 0).count();
        let huffman_bits = encoded_bit_length(frequencies, table)?;
        let fixed_width = fixed_code_width(distinct);
        let fixed_bits = fixed_length_bits(symbol_count, distinct);

        Ok(Comparison {
            symbol_count,
            distinct,
            huffman_bits,
            fixed_width,
            fixed_bits,
            saved_bits: i128::from(fixed_bits) - i128::from(huffman_bits),
            saved_percent: percent_diff(fixed_bits, huffman_bits),
        })
    }
}
