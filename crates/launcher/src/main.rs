//! devlaunch - starts the Next.js development server
//!
//! Spawns `npm run dev`, relays its merged output to the log and blocks
//! until it exits. Launch failures are logged; the exit status stays 0.

mod logging;

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use devlaunch_core::port::time_provider::SystemTimeProvider;
use devlaunch_core::port::TracingLogSink;
use devlaunch_core::{LaunchCommand, ProcessRunner};
use devlaunch_infra_system::SubprocessLauncher;

fn main() -> Result<()> {
    // 1. Initialize logging
    let log_config = logging::LogConfig::from_env();
    logging::init_logging(&log_config)?;

    debug!(version = devlaunch_core::VERSION, format = ?log_config.format, "devlaunch starting");

    // 2. Wire dependencies
    let runner = ProcessRunner::new(
        LaunchCommand::next_dev(),
        Arc::new(SubprocessLauncher::new()),
        Arc::new(TracingLogSink),
        Arc::new(SystemTimeProvider),
    );

    // 3. Run until the dev server exits; failures are already logged
    if let Some(report) = runner.run() {
        debug!(
            pid = report.pid,
            lines = report.lines_relayed,
            exit_code = ?report.exit.code,
            duration_ms = report.duration_ms,
            "Development server exited"
        );
    }

    Ok(())
}
