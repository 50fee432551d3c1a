// src/infrastructure/timing.rs
use std::time::Instant;

/// Scoped elapsed-time logger for service operations.
///
/// Logs when the operation starts, and again with the elapsed wall time
/// when the timer is dropped. Purely observational; carries no logic.
pub struct OpTimer {
    operation: &'static str,
    started: Instant,
}

impl OpTimer {
    pub fn new(operation: &'static str) -> Self {
        log::info!("{operation}() started");
        Self {
            operation,
            started: Instant::now(),
        }
    }
}

impl Drop for OpTimer {
    fn drop(&mut self) {
        log::info!(
            "{}() ended in {} ms.",
            self.operation,
            self.started.elapsed().as_millis()
        );
    }
}
