use std::io;

use crate::processing::patch::DataPatch;

/// Common error type for leader extraction, derivation and raw decoding.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("i/o failure while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("format error: {0}")]
    Format(String),
    #[error("sequencing error: {0}")]
    Sequencing(String),
    #[error("allocation failure: {0}")]
    Allocation(String),
}

impl ParserError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Underlying OS error code, when the failure came from the system.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

pub type ParserResult<T> = Result<T, ParserError>;

/// Outcome of a raw patch read.
///
/// Running out of raw records is a normal condition for a sequential reader,
/// so it is reported here rather than through [`ParserError`].
#[derive(Debug)]
pub enum PatchRead {
    Patch(DataPatch),
    EndOfData { required: usize, available: usize },
}

impl PatchRead {
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, PatchRead::EndOfData { .. })
    }
}
