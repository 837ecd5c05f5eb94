// Log Sink Port
// The runner writes every entry here instead of touching global logging state

use tracing::{error, info, warn};

/// Severity of a sink entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Destination for log entries produced by a run
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Target used for relayed entries, so they can be filtered with `RUST_LOG`
pub const CHILD_LOG_TARGET: &str = "devlaunch::child";

/// Sink backed by the process-wide `tracing` subscriber (production)
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => info!(target: CHILD_LOG_TARGET, "{}", message),
            LogLevel::Warn => warn!(target: CHILD_LOG_TARGET, "{}", message),
            LogLevel::Error => error!(target: CHILD_LOG_TARGET, "{}", message),
        }
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Sink that records every entry in order
    #[derive(Debug, Default)]
    pub struct CapturingLogSink {
        entries: Mutex<Vec<(LogLevel, String)>>,
    }

    impl CapturingLogSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn entries(&self) -> Vec<(LogLevel, String)> {
            self.entries.lock().unwrap().clone()
        }

        /// Messages recorded at `level`, in order
        pub fn messages(&self, level: LogLevel) -> Vec<String> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }

        /// Drop everything recorded so far
        pub fn take(&self) -> Vec<(LogLevel, String)> {
            std::mem::take(&mut *self.entries.lock().unwrap())
        }
    }

    impl LogSink for CapturingLogSink {
        fn log(&self, level: LogLevel, message: &str) {
            self.entries
                .lock()
                .unwrap()
                .push((level, message.to_string()));
        }
    }
}
