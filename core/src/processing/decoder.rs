use ndarray::Array2;
use num_complex::Complex64;

use crate::prelude::{ParserError, ParserResult};
use crate::processing::buffer::try_with_capacity;

/// Size of one raw signal record, leading record included.
pub const RAW_RECORD_SIZE: usize = 11_644;
/// Per-record housekeeping header preceding the I/Q samples.
pub const RAW_RECORD_HEADER_SIZE: usize = 412;
/// I/Q byte pairs following the header of each record.
pub const RANGE_SAMPLES_PER_RECORD: usize = (RAW_RECORD_SIZE - RAW_RECORD_HEADER_SIZE) / 2;

/// Decodes `lines` consecutive records into a (lines x range samples) matrix.
///
/// Each byte pair after the record header becomes one sample with the first
/// byte as in-phase and the second as quadrature component, both taken as
/// unsigned magnitudes.
pub fn decode_block(block: &[u8], lines: usize) -> ParserResult<Array2<Complex64>> {
    let expected = lines
        .checked_mul(RAW_RECORD_SIZE)
        .ok_or_else(|| ParserError::Allocation(format!("{lines} raw records overflow usize")))?;
    if block.len() != expected {
        return Err(ParserError::Format(format!(
            "raw block holds {} bytes, expected {expected} for {lines} records",
            block.len()
        )));
    }

    let mut samples = try_with_capacity(lines * RANGE_SAMPLES_PER_RECORD, "patch samples")?;
    for record in block.chunks_exact(RAW_RECORD_SIZE) {
        samples.extend(
            record[RAW_RECORD_HEADER_SIZE..]
                .chunks_exact(2)
                .map(|pair| Complex64::new(f64::from(pair[0]), f64::from(pair[1]))),
        );
    }

    Array2::from_shape_vec((lines, RANGE_SAMPLES_PER_RECORD), samples)
        .map_err(|err| ParserError::Format(format!("patch shape mismatch: {err}")))
}
