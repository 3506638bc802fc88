use log::debug;

/// Thin wrapper over the `log` facade tagging records with their source.
pub struct LogManager {
    source: String,
}

impl LogManager {
    pub fn new() -> Self {
        Self::for_source("erscore")
    }

    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn trace(&self, message: &str) {
        debug!("[{}] {}", self.source, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
