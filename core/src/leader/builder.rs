use std::collections::BTreeMap;

use crate::leader::extractor::LeaderValues;
use crate::leader::fields::LeaderField;

/// Assembles an in-memory leader image with values placed at the field table
/// offsets. Bytes outside any written field are zero.
#[derive(Debug, Clone, Default)]
pub struct LeaderBuilder {
    fields: BTreeMap<u64, Vec<u8>>,
}

impl LeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-filled with every field read by the parameter derivation.
    pub fn from_values(values: &LeaderValues) -> Self {
        Self::new()
            .text(LeaderField::MissionId, &values.mission_id)
            .number(LeaderField::Wavelength, values.wavelength)
            .number(LeaderField::RangeChirpPhaseOffset, values.range_phase_offset)
            .number(LeaderField::RangeSamplingFrequency, values.sampling_frequency_mhz)
            .number(LeaderField::RangePulseLength, values.pulse_length_us)
            .number(LeaderField::Prf, values.prf)
            .number(LeaderField::RangeBandwidth, values.range_bandwidth_mhz)
            .number(LeaderField::RangeGateDelay, values.range_gate_delay_ms)
            .number(LeaderField::VelocityX, values.velocity[0])
            .number(LeaderField::VelocityY, values.velocity[1])
            .number(LeaderField::VelocityZ, values.velocity[2])
    }

    /// Left-justified, blank-padded text. Longer input is cut at the field width.
    pub fn text(mut self, field: LeaderField, value: &str) -> Self {
        let width = field.width();
        let mut bytes: Vec<u8> = value.bytes().take(width).collect();
        bytes.resize(width, b' ');
        self.fields.insert(field.offset(), bytes);
        self
    }

    pub fn number(self, field: LeaderField, value: f64) -> Self {
        let text = format_number(value, field.width());
        self.text(field, &text)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut image = vec![0u8; LeaderField::required_leader_len() as usize];
        for (&offset, bytes) in &self.fields {
            let start = offset as usize;
            image[start..start + bytes.len()].copy_from_slice(bytes);
        }
        image
    }
}

/// Shortest decimal text for `value`, falling back to scientific notation
/// when it does not fit in `width` characters.
fn format_number(value: f64, width: usize) -> String {
    let plain = format!("{value}");
    if plain.len() <= width {
        return plain;
    }
    let mut precision = width.saturating_sub(7);
    loop {
        let scientific = format!("{value:.precision$E}");
        if scientific.len() <= width || precision == 0 {
            return scientific;
        }
        precision -= 1;
    }
}
