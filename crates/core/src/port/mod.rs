// Port Layer - Interfaces for external dependencies

pub mod log_sink;
pub mod process_launcher;
pub mod time_provider;

// Re-exports
pub use log_sink::{LogLevel, LogSink, TracingLogSink};
pub use process_launcher::{ExitOutcome, LaunchedProcess, ProcessLauncher};
pub use time_provider::TimeProvider;
