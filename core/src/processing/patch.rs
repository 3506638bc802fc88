use std::ops::Range;

use ndarray::{Array2, ArrayView1};
use num_complex::Complex64;

use crate::math::fft::FftHelper;
use crate::math::stats::{ChannelStats, StatsHelper};

/// Block of decoded raw samples, one row per azimuth line.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPatch {
    azimuth_start: usize,
    samples: Array2<Complex64>,
}

impl DataPatch {
    pub fn new(azimuth_start: usize, samples: Array2<Complex64>) -> Self {
        Self {
            azimuth_start,
            samples,
        }
    }

    /// Number of azimuth lines (rows).
    pub fn n_azimuth(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of range samples per line (columns).
    pub fn n_range(&self) -> usize {
        self.samples.ncols()
    }

    /// Index of the first line, counted from the first decoded raw record.
    pub fn azimuth_start(&self) -> usize {
        self.azimuth_start
    }

    pub fn azimuth_lines(&self) -> Range<usize> {
        self.azimuth_start..self.azimuth_start + self.n_azimuth()
    }

    pub fn samples(&self) -> &Array2<Complex64> {
        &self.samples
    }

    pub fn line(&self, line: usize) -> Option<ArrayView1<'_, Complex64>> {
        (line < self.n_azimuth()).then(|| self.samples.row(line))
    }

    pub fn sample(&self, line: usize, range: usize) -> Option<Complex64> {
        self.samples.get((line, range)).copied()
    }

    pub fn stats(&self) -> ChannelStats {
        StatsHelper::channel_stats(self.samples.iter())
    }

    /// Power spectrum of one azimuth line, zero-padded to the helper's size.
    pub fn range_spectrum(&self, line: usize, fft: &FftHelper) -> Option<Vec<f64>> {
        let row = self.line(line)?;
        Some(fft.power(&row.to_vec()))
    }

    /// Drops the patch and its sample matrix.
    pub fn release(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch() -> DataPatch {
        let samples = Array2::from_shape_fn((2, 3), |(j, i)| Complex64::new(j as f64, i as f64));
        DataPatch::new(8, samples)
    }

    #[test]
    fn dimensions_follow_matrix_shape() {
        let patch = patch();
        assert_eq!(patch.n_azimuth(), 2);
        assert_eq!(patch.n_range(), 3);
        assert_eq!(patch.azimuth_lines(), 8..10);
    }

    #[test]
    fn out_of_bounds_access_is_none() {
        let patch = patch();
        assert_eq!(patch.sample(1, 2), Some(Complex64::new(1.0, 2.0)));
        assert_eq!(patch.sample(2, 0), None);
        assert!(patch.line(2).is_none());
        assert_eq!(patch.line(1).unwrap().len(), 3);
    }

    #[test]
    fn range_spectrum_uses_fft_size() {
        let patch = patch();
        let fft = FftHelper::new(4);
        let spectrum = patch.range_spectrum(0, &fft).unwrap();
        assert_eq!(spectrum.len(), 4);
        // Line 0 is 0, i, 2i, 0 after padding; its DC bin is |3i|^2.
        assert!((spectrum[0] - 9.0).abs() < 1e-12);
        patch.release();
    }
}
