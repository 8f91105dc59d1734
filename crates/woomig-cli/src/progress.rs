//! Batch progress logging: percent complete, elapsed, and a naive ETA
//! extrapolated from the average per-record time so far.

use std::time::Instant;

pub(crate) struct Progress {
    label: String,
    total: usize,
    current: usize,
    started: Instant,
}

impl Progress {
    pub(crate) fn new(total: usize, label: &str) -> Self {
        Self {
            label: label.to_string(),
            total,
            current: 0,
            started: Instant::now(),
        }
    }

    /// Marks one record processed and logs the running position.
    pub(crate) fn tick(&mut self) {
        self.current += 1;
        let percent = if self.total == 0 {
            100
        } else {
            self.current * 100 / self.total
        };
        let elapsed = self.started.elapsed().as_secs();
        let eta = if self.current == 0 {
            0
        } else {
            elapsed * (self.total.saturating_sub(self.current) as u64) / (self.current as u64)
        };
        tracing::info!(
            "[{percent}%] {}/{} {} | elapsed: {elapsed}s | eta: {eta}s",
            self.current,
            self.total,
            self.label
        );
    }

    pub(crate) fn done(&self) {
        tracing::info!(
            "completed {} {} in {}s",
            self.total,
            self.label,
            self.started.elapsed().as_secs()
        );
    }
}
