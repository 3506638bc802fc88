pub mod buffer;
pub mod decoder;
pub mod deriver;
pub mod patch;

pub use buffer::RecordBuffer;
pub use decoder::{decode_block, RANGE_SAMPLES_PER_RECORD, RAW_RECORD_HEADER_SIZE, RAW_RECORD_SIZE};
pub use deriver::RadarParameters;
pub use patch::DataPatch;
