//! Leader and raw-signal decoding core for ERS-style SAR products.
//!
//! A [`ParserContext`] opens a leader/raw file pair, derives the radar
//! parameters from fixed-offset leader fields and then decodes the raw file
//! sequentially into complex sample patches, one synthetic aperture of azimuth
//! lines at a time.

pub mod context;
pub mod leader;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use context::{ParserContext, Patches};
pub use prelude::{ParserError, ParserResult, PatchRead};
pub use processing::{DataPatch, RadarParameters};
