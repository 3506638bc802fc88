use std::sync::Mutex;

use serde::Serialize;

/// Counters for one parser context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadMetrics {
    pub patches: usize,
    pub bytes: u64,
    pub end_of_data: usize,
    pub errors: usize,
}

pub struct MetricsRecorder {
    inner: Mutex<ReadMetrics>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ReadMetrics::default()),
        }
    }

    pub fn record_patch(&self, bytes: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.patches += 1;
            metrics.bytes += bytes as u64;
        }
    }

    pub fn record_end_of_data(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.end_of_data += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> ReadMetrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
