use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::leader::extractor::LeaderReader;
use crate::leader::fields::LeaderField;
use crate::prelude::{ParserError, ParserResult, PatchRead};
use crate::processing::buffer::RecordBuffer;
use crate::processing::decoder::{decode_block, RANGE_SAMPLES_PER_RECORD, RAW_RECORD_SIZE};
use crate::processing::deriver::RadarParameters;
use crate::processing::patch::DataPatch;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{MetricsRecorder, ReadMetrics};

/// Owns a leader/raw file pair and the sequential read state over the raw file.
///
/// Reads only move forward: the raw cursor and the azimuth line counter never
/// decrease.
pub struct ParserContext<R = File> {
    leader: LeaderReader<R>,
    raw: R,
    leader_path: Option<PathBuf>,
    raw_path: Option<PathBuf>,
    raw_cursor: u64,
    azimuth_position: usize,
    params: Option<RadarParameters>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<R> fmt::Debug for ParserContext<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserContext")
            .field("leader_path", &self.leader_path)
            .field("raw_path", &self.raw_path)
            .field("raw_cursor", &self.raw_cursor)
            .field("azimuth_position", &self.azimuth_position)
            .field("parameters_loaded", &self.params.is_some())
            .finish()
    }
}

fn open_input(role: &str, path: &Path) -> ParserResult<File> {
    if path.as_os_str().is_empty() {
        return Err(ParserError::InvalidArgument(format!("empty {role} path")));
    }
    File::open(path)
        .map_err(|err| ParserError::io(format!("opening {role} file {}", path.display()), err))
}

impl ParserContext<File> {
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(leader_path: P, raw_path: Q) -> ParserResult<Self> {
        let leader_path = leader_path.as_ref();
        let raw_path = raw_path.as_ref();
        let leader = open_input("leader", leader_path)?;
        let raw = open_input("raw", raw_path)?;

        let mut ctx = Self::from_readers(leader, raw);
        ctx.leader_path = Some(leader_path.to_path_buf());
        ctx.raw_path = Some(raw_path.to_path_buf());
        ctx.logger.trace(&format!(
            "opened leader {} and raw {}",
            leader_path.display(),
            raw_path.display()
        ));
        Ok(ctx)
    }
}

impl<R: Read + Seek> ParserContext<R> {
    pub fn from_readers(leader: R, raw: R) -> Self {
        Self {
            leader: LeaderReader::new(leader),
            raw,
            leader_path: None,
            raw_path: None,
            raw_cursor: 0,
            azimuth_position: 0,
            params: None,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        }
    }

    /// Extracts the leader fields and derives the radar parameters. Calling it
    /// again re-derives and replaces the cached copy.
    pub fn load_parameters(&mut self) -> ParserResult<RadarParameters> {
        let values = self.leader.read_values()?;
        let params = RadarParameters::derive(&values)?;
        self.logger.trace(&format!(
            "derived parameters for {:?}: {} azimuth lines x {} valid range samples",
            params.mission_id, params.azimuth_fft_len, params.n_valid_samples
        ));
        self.params = Some(params.clone());
        Ok(params)
    }

    pub fn parameters(&self) -> Option<&RadarParameters> {
        self.params.as_ref()
    }

    /// Range samples per decoded line, once parameters are loaded.
    pub fn range_samples(&self) -> Option<usize> {
        self.params.as_ref().map(|_| RANGE_SAMPLES_PER_RECORD)
    }

    /// Raw text of every leader field in the field table.
    pub fn dump_leader_fields(&mut self) -> ParserResult<Vec<(LeaderField, String)>> {
        self.leader.dump_fields()
    }

    /// Decodes the next block of `azimuth_fft_len` raw records.
    ///
    /// A block that cannot be read in full yields [`PatchRead::EndOfData`] and
    /// leaves the cursor where it was.
    pub fn read_patch(&mut self) -> ParserResult<PatchRead> {
        let outcome = self.read_next_block();
        match &outcome {
            Ok(PatchRead::Patch(patch)) => {
                self.metrics.record_patch(patch.n_azimuth() * RAW_RECORD_SIZE)
            }
            Ok(PatchRead::EndOfData { .. }) => self.metrics.record_end_of_data(),
            Err(_) => self.metrics.record_error(),
        }
        outcome
    }

    fn read_next_block(&mut self) -> ParserResult<PatchRead> {
        let lines = self
            .params
            .as_ref()
            .map(|params| params.azimuth_fft_len)
            .ok_or_else(|| {
                ParserError::Sequencing("load parameters before reading raw data".into())
            })?;

        if self.raw_cursor == 0 {
            // The first record of the raw file is administrative, not echo data.
            self.raw_cursor = RAW_RECORD_SIZE as u64;
            self.logger.trace("skipped leading raw record");
        }

        let required = RAW_RECORD_SIZE.checked_mul(lines).ok_or_else(|| {
            ParserError::Allocation(format!("{lines} raw records overflow usize"))
        })?;

        let landed = self
            .raw
            .seek(SeekFrom::Start(self.raw_cursor))
            .map_err(|err| ParserError::io("seeking raw file", err))?;
        if landed != self.raw_cursor {
            return Err(ParserError::io(
                "seeking raw file",
                std::io::Error::new(
                    ErrorKind::Other,
                    format!("seek landed at {landed}, expected {}", self.raw_cursor),
                ),
            ));
        }

        let mut buffer = RecordBuffer::allocate(required)?;
        let available = buffer
            .fill_from(&mut self.raw)
            .map_err(|err| ParserError::io("reading raw record block", err))?;
        if available < required {
            self.logger.trace(&format!(
                "end of raw data at byte {}: {available} of {required} bytes left",
                self.raw_cursor
            ));
            return Ok(PatchRead::EndOfData {
                required,
                available,
            });
        }

        let samples = decode_block(buffer.as_slice(), lines)?;
        let patch = DataPatch::new(self.azimuth_position, samples);
        self.raw_cursor += required as u64;
        self.azimuth_position += lines;
        Ok(PatchRead::Patch(patch))
    }

    /// Iterates over the remaining patches, stopping at end of data or after
    /// the first error.
    pub fn patches(&mut self) -> Patches<'_, R> {
        Patches {
            ctx: self,
            finished: false,
        }
    }

    /// Byte offset of the next raw record to decode.
    pub fn raw_cursor(&self) -> u64 {
        self.raw_cursor
    }

    /// Azimuth index the next patch will start at.
    pub fn azimuth_position(&self) -> usize {
        self.azimuth_position
    }

    pub fn metrics(&self) -> ReadMetrics {
        self.metrics.snapshot()
    }

    pub fn leader_path(&self) -> Option<&Path> {
        self.leader_path.as_deref()
    }

    pub fn raw_path(&self) -> Option<&Path> {
        self.raw_path.as_deref()
    }

    /// Closes both inputs.
    pub fn close(self) {
        self.logger.trace(&format!(
            "closing context after {} azimuth lines",
            self.azimuth_position
        ));
    }
}

pub struct Patches<'a, R> {
    ctx: &'a mut ParserContext<R>,
    finished: bool,
}

impl<R: Read + Seek> Iterator for Patches<'_, R> {
    type Item = ParserResult<DataPatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.ctx.read_patch() {
            Ok(PatchRead::Patch(patch)) => Some(Ok(patch)),
            Ok(PatchRead::EndOfData { .. }) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
