pub mod builder;
pub mod extractor;
pub mod fields;

pub use builder::LeaderBuilder;
pub use extractor::{parse_number, LeaderReader, LeaderValues};
pub use fields::{FieldSpec, LeaderField, LEADER_DESCRIPTOR_RECORD_SIZE};
