use std::f64::consts::PI;

/// Mid-scale value of an unsigned 8-bit I/Q channel.
pub const IQ_BIAS: f64 = 127.5;

/// Complex tone of `length` samples at `cycles` periods across the line,
/// returned as (I, Q) pairs around zero.
pub fn complex_tone(length: usize, cycles: f64, amplitude: f64) -> Vec<(f64, f64)> {
    (0..length)
        .map(|i| {
            let phase = 2.0 * PI * cycles * i as f64 / length as f64;
            (amplitude * phase.cos(), amplitude * phase.sin())
        })
        .collect()
}

/// Shifts a zero-centred value into the unsigned byte range.
pub fn to_unsigned_byte(value: f64) -> u8 {
    (value + IQ_BIAS).round().clamp(0.0, 255.0) as u8
}
