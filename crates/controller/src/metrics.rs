//! Controller command metrics.
//!
//! Provides functions for recording command latency and failures.

use metrics::{counter, histogram};
use std::time::Instant;

use crate::error::CommandErrorCause;

/// Record operational command duration.
pub fn record_command_duration(command: &str, duration_secs: f64) {
    histogram!(
        "controller_command_duration_seconds",
        "command" => command.to_string()
    )
    .record(duration_secs);
}

/// Record a failed operational command.
pub fn record_command_failure(command: &str, cause: CommandErrorCause) {
    counter!(
        "controller_command_failures_total",
        "command" => command.to_string(),
        "cause" => cause.to_string()
    )
    .increment(1);
}

/// A helper to time controller commands and record metrics.
///
/// Usage:
/// ```ignore
/// let timer = CommandTimer::new("license-info");
/// let result = client.send(...).await;
/// timer.record();
/// result
/// ```
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Create a new timer for the given command name.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the timer started.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_command_duration(&self.command, duration);
    }
}
