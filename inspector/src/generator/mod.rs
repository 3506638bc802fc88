pub mod profile;
pub mod template;

pub use profile::{write_product, GeneratorConfig};
