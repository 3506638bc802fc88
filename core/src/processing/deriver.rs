use std::fmt;

use serde::{Deserialize, Serialize};

use crate::leader::extractor::LeaderValues;
use crate::math::fft::next_power_of_two;
use crate::math::geometry::{GeometryHelper, SPEED_OF_LIGHT};
use crate::prelude::{ParserError, ParserResult};
use crate::processing::decoder::RANGE_SAMPLES_PER_RECORD;

/// Radar parameters derived from the leader file, in SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarParameters {
    pub mission_id: String,
    /// Radar wavelength [m].
    pub wavelength: f64,
    /// Range chirp phase offset [rad].
    pub range_phase_offset: f64,
    /// Range sampling frequency [Hz].
    pub sampling_frequency: f64,
    /// Range pulse duration [s].
    pub pulse_duration: f64,
    /// Pulse repetition frequency [Hz].
    pub prf: f64,
    /// Range gate delay [s].
    pub range_gate_delay: f64,
    /// Range chirp bandwidth [Hz].
    pub range_bandwidth: f64,
    /// Magnitude of the orbital velocity vector [m/s].
    pub platform_speed: f64,
    /// Ground-equivalent platform velocity [m/s].
    pub velocity: f64,
    /// Range chirp slope [Hz/s].
    pub range_chirp_slope: f64,
    /// Along-track distance between pulses [m].
    pub azimuth_pulse_spacing: f64,
    pub pulses_per_aperture: usize,
    pub n_valid_samples: usize,
    pub range_fft_len: usize,
    /// Azimuth lines per synthetic aperture, rounded up to a power of two.
    pub azimuth_fft_len: usize,
    pub speed_of_light: f64,
    /// Slant range of the first sample [m].
    pub near_range: f64,
    pub range_pixel_spacing: f64,
    /// Azimuth antenna beam width [rad].
    pub az_beam_width: f64,
}

fn require_positive(name: &str, value: f64) -> ParserResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ParserError::Format(format!(
            "{name} must be positive, leader gives {value}"
        )))
    }
}

impl RadarParameters {
    pub fn derive(values: &LeaderValues) -> ParserResult<Self> {
        let wavelength = require_positive("wavelength", values.wavelength)?;
        let prf = require_positive("prf", values.prf)?;
        let sampling_frequency =
            require_positive("sampling frequency", values.sampling_frequency_mhz * 1e6)?;
        let pulse_duration = require_positive("pulse duration", values.pulse_length_us * 1e-6)?;
        let range_bandwidth = values.range_bandwidth_mhz * 1e6;
        let range_gate_delay = values.range_gate_delay_ms * 1e-3;

        let platform_speed =
            require_positive("platform speed", GeometryHelper::speed(values.velocity))?;
        let velocity = GeometryHelper::effective_velocity(platform_speed);

        let az_beam_width = GeometryHelper::azimuth_beam_width(wavelength);
        let ground_beam_width = GeometryHelper::ground_beam_width(az_beam_width);
        let azimuth_pulse_spacing = velocity / prf;
        let pulses = (ground_beam_width / azimuth_pulse_spacing).ceil();
        if !pulses.is_finite() || pulses > usize::MAX as f64 {
            return Err(ParserError::Format(format!(
                "aperture needs {pulses} pulses, which is not representable"
            )));
        }
        let pulses_per_aperture = (pulses as usize).max(1);
        let azimuth_fft_len = next_power_of_two(pulses_per_aperture).ok_or_else(|| {
            ParserError::Format(format!("no power of two covers {pulses_per_aperture} pulses"))
        })?;

        let pulse_samples = (pulse_duration * sampling_frequency).round();
        if pulse_samples >= RANGE_SAMPLES_PER_RECORD as f64 {
            return Err(ParserError::Format(format!(
                "pulse spans {pulse_samples} samples, record only holds {RANGE_SAMPLES_PER_RECORD}"
            )));
        }
        let n_valid_samples = RANGE_SAMPLES_PER_RECORD - pulse_samples as usize;
        let range_fft_len = next_power_of_two(n_valid_samples).ok_or_else(|| {
            ParserError::Format(format!("no power of two covers {n_valid_samples} samples"))
        })?;

        Ok(Self {
            mission_id: values.mission_id.clone(),
            wavelength,
            range_phase_offset: values.range_phase_offset,
            sampling_frequency,
            pulse_duration,
            prf,
            range_gate_delay,
            range_bandwidth,
            platform_speed,
            velocity,
            range_chirp_slope: range_bandwidth / pulse_duration,
            azimuth_pulse_spacing,
            pulses_per_aperture,
            n_valid_samples,
            range_fft_len,
            azimuth_fft_len,
            speed_of_light: SPEED_OF_LIGHT,
            near_range: GeometryHelper::near_range(range_gate_delay),
            range_pixel_spacing: GeometryHelper::range_pixel_spacing(sampling_frequency),
            az_beam_width,
        })
    }

    /// Human-readable `label: value` lines.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Mission id: {}", self.mission_id),
            format!("Wavelength: {:.6} [m]", self.wavelength),
            format!("Range chirp slope: {:.6} [Hz/s]", self.range_chirp_slope),
            format!("Range pulse phase offset: {:.6} [rad]", self.range_phase_offset),
            format!("Sampling frequency: {:.6} [Hz]", self.sampling_frequency),
            format!("Range pulse width: {:.9} [s]", self.pulse_duration),
            format!("Pulse repetition frequency: {:.6} [Hz]", self.prf),
            format!("Range gate delay: {:.9} [s]", self.range_gate_delay),
            format!("Near range: {:.3} [m]", self.near_range),
            format!("Range pixel spacing: {:.3} [m]", self.range_pixel_spacing),
            format!("Velocity: {:.6} [m/s]", self.velocity),
            format!("Azimuth beam width: {:.6} [rad]", self.az_beam_width),
            format!("Pulses per aperture: {}", self.pulses_per_aperture),
            format!("n_samples: {}", self.n_valid_samples),
            format!("FFT length: {}", self.range_fft_len),
            format!("FFT lines: {}", self.azimuth_fft_len),
        ]
    }
}

impl fmt::Display for RadarParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.summary_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
