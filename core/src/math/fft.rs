use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};

/// Smallest power of two that is >= `n` (`2^ceil(log2 n)`); zero maps to one.
/// `None` when the result does not fit in `usize`.
pub fn next_power_of_two(n: usize) -> Option<usize> {
    n.max(1).checked_next_power_of_two()
}

/// Helper that wraps the `rustfft` planner for reuse.
pub struct FftHelper {
    fft: std::sync::Arc<dyn Fft<f64>>,
    size: usize,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward transform of `input`, zero-padded or truncated to the planned size.
    pub fn forward(&self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input.iter().take(self.size).copied().collect();
        buffer.resize(self.size, Complex64::zero());
        self.fft.process(&mut buffer);
        buffer
    }

    /// Power spectrum `|X[k]|^2` of `input`.
    pub fn power(&self, input: &[Complex64]) -> Vec<f64> {
        self.forward(input).iter().map(|c| c.norm_sqr()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_power_of_two_examples() {
        assert_eq!(next_power_of_two(0), Some(1));
        assert_eq!(next_power_of_two(1), Some(1));
        assert_eq!(next_power_of_two(1000), Some(1024));
        assert_eq!(next_power_of_two(1024), Some(1024));
        assert_eq!(next_power_of_two(1025), Some(2048));
        assert_eq!(next_power_of_two(4912), Some(8192));
        assert_eq!(next_power_of_two(usize::MAX), None);
    }

    #[test]
    fn next_power_of_two_is_idempotent_and_monotonic() {
        let mut previous = 1;
        for n in 1..5000 {
            let p = next_power_of_two(n).unwrap();
            assert!(p.is_power_of_two() && p >= n);
            assert_eq!(next_power_of_two(p), Some(p));
            assert!(p >= previous);
            previous = p;
        }
    }

    #[test]
    fn fft_helper_pads_to_planned_size() {
        let helper = FftHelper::new(8);
        let output = helper.forward(&[Complex64::new(1.0, 0.0)]);
        assert_eq!(output.len(), 8);
        assert!(output.iter().all(|c| (c.re - 1.0).abs() < 1e-12 && c.im.abs() < 1e-12));
    }

    #[test]
    fn power_peaks_at_tone_bin() {
        let helper = FftHelper::new(16);
        let tone: Vec<Complex64> = (0..16)
            .map(|n| Complex64::from_polar(1.0, 2.0 * std::f64::consts::PI * 3.0 * n as f64 / 16.0))
            .collect();
        let power = helper.power(&tone);
        let peak = power
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(bin, _)| bin);
        assert_eq!(peak, Some(3));
    }
}
