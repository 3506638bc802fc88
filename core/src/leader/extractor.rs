use std::io::{ErrorKind, Read, Seek, SeekFrom};

use serde::{Deserialize, Serialize};

use crate::leader::fields::{FieldSpec, LeaderField};
use crate::prelude::{ParserError, ParserResult};

/// Raw leader values in the units the file stores them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderValues {
    pub mission_id: String,
    /// Radar wavelength [m].
    pub wavelength: f64,
    /// Range chirp phase offset [rad].
    pub range_phase_offset: f64,
    /// Range sampling frequency [MHz].
    pub sampling_frequency_mhz: f64,
    /// Range pulse length [us].
    pub pulse_length_us: f64,
    /// Pulse repetition frequency [Hz].
    pub prf: f64,
    /// Range bandwidth [MHz].
    pub range_bandwidth_mhz: f64,
    /// Range gate delay [ms].
    pub range_gate_delay_ms: f64,
    /// Platform velocity components [m/s].
    pub velocity: [f64; 3],
}

/// Reads fixed-offset fields out of a leader file.
pub struct LeaderReader<R> {
    inner: R,
}

impl<R: Read + Seek> LeaderReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Seeks to `offset` and reads exactly `len` bytes.
    pub fn read_at(&mut self, name: &str, offset: u64, len: usize) -> ParserResult<Vec<u8>> {
        let landed = self
            .inner
            .seek(SeekFrom::Start(offset))
            .map_err(|err| ParserError::io(format!("seeking leader to {name}"), err))?;
        if landed != offset {
            return Err(ParserError::io(
                format!("seeking leader to {name}"),
                std::io::Error::new(
                    ErrorKind::Other,
                    format!("seek landed at {landed}, expected {offset}"),
                ),
            ));
        }

        let mut buffer = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            match self.inner.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(count) => filled += count,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    return Err(ParserError::io(format!("reading leader field {name}"), err))
                }
            }
        }

        if filled != len {
            return Err(ParserError::Format(format!(
                "leader field {name} at offset {offset} truncated: read {filled} of {len} bytes"
            )));
        }
        Ok(buffer)
    }

    pub fn read_field(&mut self, field: LeaderField) -> ParserResult<Vec<u8>> {
        let FieldSpec { name, offset, len } = field.spec();
        self.read_at(name, offset, len)
    }

    /// Field content with trailing blanks and NULs removed.
    pub fn read_text(&mut self, field: LeaderField) -> ParserResult<String> {
        let raw = self.read_field(field)?;
        Ok(field_text(&raw))
    }

    pub fn read_number(&mut self, field: LeaderField) -> ParserResult<f64> {
        let raw = self.read_field(field)?;
        parse_number(field, &raw)
    }

    /// Reads every field the parameter derivation needs.
    pub fn read_values(&mut self) -> ParserResult<LeaderValues> {
        Ok(LeaderValues {
            mission_id: self.read_text(LeaderField::MissionId)?,
            wavelength: self.read_number(LeaderField::Wavelength)?,
            range_phase_offset: self.read_number(LeaderField::RangeChirpPhaseOffset)?,
            sampling_frequency_mhz: self.read_number(LeaderField::RangeSamplingFrequency)?,
            pulse_length_us: self.read_number(LeaderField::RangePulseLength)?,
            prf: self.read_number(LeaderField::Prf)?,
            range_bandwidth_mhz: self.read_number(LeaderField::RangeBandwidth)?,
            range_gate_delay_ms: self.read_number(LeaderField::RangeGateDelay)?,
            velocity: [
                self.read_number(LeaderField::VelocityX)?,
                self.read_number(LeaderField::VelocityY)?,
                self.read_number(LeaderField::VelocityZ)?,
            ],
        })
    }

    /// Raw text of every known field, in table order.
    pub fn dump_fields(&mut self) -> ParserResult<Vec<(LeaderField, String)>> {
        LeaderField::ALL
            .iter()
            .map(|&field| self.read_text(field).map(|text| (field, text)))
            .collect()
    }
}

fn field_text(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(|c: char| c == '\0' || c.is_ascii_whitespace())
        .to_string()
}

/// Parses an ASCII decimal field. Blank, malformed and non-finite values are
/// rejected.
pub fn parse_number(field: LeaderField, raw: &[u8]) -> ParserResult<f64> {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return Err(ParserError::Format(format!("leader field {field} is blank")));
    }

    let value: f64 = trimmed.parse().map_err(|_| {
        ParserError::Format(format!("leader field {field} is not a number: {trimmed:?}"))
    })?;
    if !value.is_finite() {
        return Err(ParserError::Format(format!(
            "leader field {field} is not finite: {trimmed:?}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::builder::LeaderBuilder;
    use std::io::{self, Cursor};

    fn sample_leader() -> Vec<u8> {
        LeaderBuilder::new()
            .text(LeaderField::MissionId, "ERS-2")
            .number(LeaderField::Wavelength, 0.0566)
            .number(LeaderField::RangeChirpPhaseOffset, 0.0)
            .number(LeaderField::RangeSamplingFrequency, 18.962468)
            .number(LeaderField::RangePulseLength, 37.1)
            .number(LeaderField::Prf, 1679.9)
            .number(LeaderField::RangeBandwidth, 15.55)
            .number(LeaderField::RangeGateDelay, 5.5)
            .number(LeaderField::VelocityX, 7098.0)
            .number(LeaderField::VelocityY, 446.0)
            .number(LeaderField::VelocityZ, 123.0)
            .build()
    }

    #[test]
    fn read_values_round_trips_builder_output() {
        let mut reader = LeaderReader::new(Cursor::new(sample_leader()));
        let values = reader.read_values().unwrap();

        assert_eq!(values.mission_id, "ERS-2");
        assert!((values.wavelength - 0.0566).abs() < 1e-12);
        assert!((values.sampling_frequency_mhz - 18.962468).abs() < 1e-12);
        assert!((values.pulse_length_us - 37.1).abs() < 1e-12);
        assert!((values.prf - 1679.9).abs() < 1e-9);
        assert!((values.range_gate_delay_ms - 5.5).abs() < 1e-12);
        assert_eq!(values.velocity, [7098.0, 446.0, 123.0]);
    }

    #[test]
    fn mission_id_keeps_full_field_width() {
        let leader = LeaderBuilder::new()
            .text(LeaderField::MissionId, "ABCDEFGHIJKLMNOP")
            .build();
        let mut reader = LeaderReader::new(Cursor::new(leader));
        assert_eq!(reader.read_text(LeaderField::MissionId).unwrap(), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn short_leader_is_a_format_error() {
        let mut leader = sample_leader();
        leader.truncate(LeaderField::VelocityZ.offset() as usize + 4);
        let mut reader = LeaderReader::new(Cursor::new(leader));

        let err = reader.read_field(LeaderField::VelocityZ).unwrap_err();
        assert!(matches!(err, ParserError::Format(_)), "{err}");
        assert!(err.to_string().contains("velocity_z"));
    }

    #[test]
    fn parse_number_accepts_padding() {
        assert_eq!(parse_number(LeaderField::Prf, b"  1679.9\0\0").unwrap(), 1679.9);
        assert_eq!(parse_number(LeaderField::Prf, b"-12       ").unwrap(), -12.0);
        assert_eq!(parse_number(LeaderField::Prf, b"4.19E11").unwrap(), 4.19e11);
    }

    #[test]
    fn parse_number_rejects_garbage() {
        for raw in [&b"                "[..], b"abc", b"12.5x", b"NaN", b"inf"] {
            let err = parse_number(LeaderField::Wavelength, raw).unwrap_err();
            assert!(matches!(err, ParserError::Format(_)));
        }
    }

    #[test]
    fn dump_fields_lists_every_table_entry() {
        let mut reader = LeaderReader::new(Cursor::new(sample_leader()));
        let dump = reader.dump_fields().unwrap();
        assert_eq!(dump.len(), LeaderField::ALL.len());
        assert_eq!(dump[0], (LeaderField::MissionId, "ERS-2".to_string()));
        assert_eq!(dump[2], (LeaderField::RangeChirpSlope, String::new()));
    }

    /// Leader image that refuses every read with EIO.
    struct UnreadableLeader(Cursor<Vec<u8>>);

    impl Read for UnreadableLeader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from_raw_os_error(5))
        }
    }

    impl Seek for UnreadableLeader {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.0.seek(pos)
        }
    }

    /// Leader image whose seeks report a position one byte short.
    struct DriftingLeader(Cursor<Vec<u8>>);

    impl Read for DriftingLeader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf)
        }
    }

    impl Seek for DriftingLeader {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            Ok(self.0.seek(pos)?.saturating_sub(1))
        }
    }

    #[test]
    fn failed_field_read_is_io_error() {
        let mut reader = LeaderReader::new(UnreadableLeader(Cursor::new(sample_leader())));
        let err = reader.read_field(LeaderField::Prf).unwrap_err();
        assert!(matches!(err, ParserError::Io { .. }), "{err}");
        assert_eq!(err.raw_os_error(), Some(5));
        assert!(err.to_string().contains("prf"), "{err}");
    }

    #[test]
    fn seek_to_wrong_offset_is_io_error() {
        let mut reader = LeaderReader::new(DriftingLeader(Cursor::new(sample_leader())));
        let err = reader.read_field(LeaderField::Wavelength).unwrap_err();
        assert!(matches!(err, ParserError::Io { .. }), "{err}");
        assert!(err.to_string().contains("seeking leader"), "{err}");
        assert!(matches!(reader.read_values(), Err(ParserError::Io { .. })));
    }
}
