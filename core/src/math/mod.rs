pub mod fft;
pub mod geometry;
pub mod stats;

pub use fft::{next_power_of_two, FftHelper};
pub use geometry::GeometryHelper;
pub use stats::{ChannelStats, StatsHelper};
