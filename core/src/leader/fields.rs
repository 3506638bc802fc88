/// Size of the leader file descriptor record that precedes the dataset
/// summary record. All field offsets below are absolute.
pub const LEADER_DESCRIPTOR_RECORD_SIZE: u64 = 720;

const H: u64 = LEADER_DESCRIPTOR_RECORD_SIZE;
const PROCESSOR_LOCAL_SEGMENT: u64 = H + 1886;

/// Fixed-offset fields of the leader file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderField {
    MissionId,
    Wavelength,
    RangeChirpSlope,
    RangeChirpPhaseOffset,
    RangeSamplingFrequency,
    RangePulseLength,
    Prf,
    AzimuthBeamWidth,
    RangeBandwidth,
    RangeGateDelay,
    VelocityX,
    VelocityY,
    VelocityZ,
}

/// Location of one field inside the leader file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: u64,
    pub len: usize,
}

impl FieldSpec {
    pub const fn end(&self) -> u64 {
        self.offset + self.len as u64
    }
}

static FIELD_TABLE: [(LeaderField, FieldSpec); 13] = [
    (LeaderField::MissionId, FieldSpec { name: "mission_id", offset: H + 396, len: 16 }),
    (LeaderField::Wavelength, FieldSpec { name: "wavelength", offset: H + 500, len: 16 }),
    (
        LeaderField::RangeChirpSlope,
        FieldSpec { name: "range_chirp_slope", offset: H + 550, len: 16 },
    ),
    (
        LeaderField::RangeChirpPhaseOffset,
        FieldSpec { name: "range_chirp_phase_offset", offset: H + 615, len: 16 },
    ),
    (
        LeaderField::RangeSamplingFrequency,
        FieldSpec { name: "range_sampling_frequency", offset: H + 710, len: 16 },
    ),
    (
        LeaderField::RangePulseLength,
        FieldSpec { name: "range_pulse_length", offset: H + 742, len: 16 },
    ),
    (LeaderField::Prf, FieldSpec { name: "prf", offset: H + 934, len: 16 }),
    (
        LeaderField::AzimuthBeamWidth,
        FieldSpec { name: "azimuth_beam_width", offset: H + 966, len: 16 },
    ),
    (LeaderField::RangeBandwidth, FieldSpec { name: "range_bandwidth", offset: H + 1254, len: 16 }),
    (
        LeaderField::RangeGateDelay,
        FieldSpec { name: "range_gate_delay", offset: H + 1766, len: 16 },
    ),
    (
        LeaderField::VelocityX,
        FieldSpec { name: "velocity_x", offset: PROCESSOR_LOCAL_SEGMENT + 452, len: 22 },
    ),
    (
        LeaderField::VelocityY,
        FieldSpec { name: "velocity_y", offset: PROCESSOR_LOCAL_SEGMENT + 474, len: 22 },
    ),
    (
        LeaderField::VelocityZ,
        FieldSpec { name: "velocity_z", offset: PROCESSOR_LOCAL_SEGMENT + 496, len: 22 },
    ),
];

impl LeaderField {
    pub const ALL: [LeaderField; 13] = [
        LeaderField::MissionId,
        LeaderField::Wavelength,
        LeaderField::RangeChirpSlope,
        LeaderField::RangeChirpPhaseOffset,
        LeaderField::RangeSamplingFrequency,
        LeaderField::RangePulseLength,
        LeaderField::Prf,
        LeaderField::AzimuthBeamWidth,
        LeaderField::RangeBandwidth,
        LeaderField::RangeGateDelay,
        LeaderField::VelocityX,
        LeaderField::VelocityY,
        LeaderField::VelocityZ,
    ];

    pub fn spec(self) -> FieldSpec {
        // Table rows follow declaration order.
        FIELD_TABLE[self as usize].1
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn offset(self) -> u64 {
        self.spec().offset
    }

    pub fn width(self) -> usize {
        self.spec().len
    }

    /// Smallest leader size that contains every known field.
    pub fn required_leader_len() -> u64 {
        FIELD_TABLE
            .iter()
            .map(|(_, spec)| spec.end())
            .max()
            .unwrap_or(0)
    }
}

impl std::fmt::Display for LeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_match_enum_order() {
        for (index, field) in LeaderField::ALL.iter().enumerate() {
            assert_eq!(FIELD_TABLE[index].0, *field);
        }
    }

    #[test]
    fn offsets_are_relative_to_descriptor_record() {
        assert_eq!(LeaderField::MissionId.offset(), 1116);
        assert_eq!(LeaderField::Prf.offset(), 1654);
        assert_eq!(LeaderField::VelocityX.offset(), 720 + 1886 + 452);
        assert_eq!(LeaderField::VelocityZ.width(), 22);
    }

    #[test]
    fn fields_do_not_overlap() {
        let mut specs: Vec<FieldSpec> = LeaderField::ALL.iter().map(|f| f.spec()).collect();
        specs.sort_by_key(|spec| spec.offset);
        for pair in specs.windows(2) {
            assert!(pair[0].end() <= pair[1].offset, "{} overlaps {}", pair[0].name, pair[1].name);
        }
    }

    #[test]
    fn required_len_covers_last_velocity_component() {
        assert_eq!(LeaderField::required_leader_len(), 720 + 1886 + 496 + 22);
    }
}
