pub mod config;
pub mod runner;

pub use config::{ConfigOverrides, InspectConfig};
pub use runner::{InspectionResult, Runner};
