use num_complex::Complex64;
use serde::Serialize;

/// Per-channel summary of a block of I/Q samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelStats {
    pub mean_i: f64,
    pub mean_q: f64,
    pub rms_i: f64,
    pub rms_q: f64,
}

pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    pub fn channel_stats<'a, I>(samples: I) -> ChannelStats
    where
        I: IntoIterator<Item = &'a Complex64>,
    {
        let mut count = 0usize;
        let (mut sum_i, mut sum_q, mut sq_i, mut sq_q) = (0.0, 0.0, 0.0, 0.0);
        for sample in samples {
            count += 1;
            sum_i += sample.re;
            sum_q += sample.im;
            sq_i += sample.re * sample.re;
            sq_q += sample.im * sample.im;
        }
        if count == 0 {
            return ChannelStats {
                mean_i: 0.0,
                mean_q: 0.0,
                rms_i: 0.0,
                rms_q: 0.0,
            };
        }
        let n = count as f64;
        ChannelStats {
            mean_i: sum_i / n,
            mean_q: sum_q / n,
            rms_i: (sq_i / n).sqrt(),
            rms_q: (sq_q / n).sqrt(),
        }
    }
}
