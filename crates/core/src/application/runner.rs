// ProcessRunner - launch, relay, wait
use std::sync::Arc;
use tracing::debug;

use crate::domain::{normalize_line, LaunchCommand, LaunchError};
use crate::port::{ExitOutcome, LogSink, ProcessLauncher, TimeProvider};

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub pid: u32,
    /// Lines relayed to the sink (banner excluded)
    pub lines_relayed: usize,
    pub exit: ExitOutcome,
    pub duration_ms: i64,
}

/// Starts one fixed command and relays its merged output to a sink
///
/// Single-threaded and blocking: `run` returns only after the child
/// closed its output and exited.
pub struct ProcessRunner {
    command: LaunchCommand,
    launcher: Arc<dyn ProcessLauncher>,
    sink: Arc<dyn LogSink>,
    time_provider: Arc<dyn TimeProvider>,
}

impl ProcessRunner {
    /// Create a new runner
    ///
    /// # Arguments
    /// * `command` - What to start (`LaunchCommand::next_dev()` in production)
    /// * `launcher` - OS adapter that spawns the child
    /// * `sink` - Receives the banner, every relayed line and failures
    /// * `time_provider` - Clock for the run duration
    ///
    /// # Example
    /// ```ignore
    /// let runner = ProcessRunner::new(
    ///     LaunchCommand::next_dev(),
    ///     Arc::new(SubprocessLauncher::new()),
    ///     Arc::new(TracingLogSink),
    ///     Arc::new(SystemTimeProvider),
    /// );
    /// runner.run();
    /// ```
    pub fn new(
        command: LaunchCommand,
        launcher: Arc<dyn ProcessLauncher>,
        sink: Arc<dyn LogSink>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            command,
            launcher,
            sink,
            time_provider,
        }
    }

    pub fn command(&self) -> &LaunchCommand {
        &self.command
    }

    /// Run the command, logging any failure instead of returning it
    ///
    /// Returns `None` when a [`LaunchError`] was handled. Exactly one
    /// ERROR entry is written in that case.
    pub fn run(&self) -> Option<RunReport> {
        match self.try_run() {
            Ok(report) => Some(report),
            Err(e) => {
                debug!(
                    program = %self.command.program(),
                    command_not_found = e.is_command_not_found(),
                    "Run ended with handled error"
                );
                self.sink.error(&e.to_string());
                None
            }
        }
    }

    /// Run the command and hand the failure back to the caller
    ///
    /// The banner and relayed lines still go to the sink; the error does not.
    pub fn try_run(&self) -> Result<RunReport, LaunchError> {
        self.sink.info(self.command.banner());
        let start_time = self.time_provider.now_millis();

        debug!(
            program = %self.command.program(),
            args = ?self.command.args(),
            "Spawning child process"
        );
        let mut child = self.launcher.launch(&self.command)?;
        let pid = child.pid();

        let mut lines_relayed = 0;
        while let Some(raw) = child.next_line()? {
            self.sink.info(&normalize_line(&raw));
            lines_relayed += 1;
        }

        let exit = child.wait()?;
        let duration_ms = self.time_provider.now_millis() - start_time;

        if !exit.success {
            self.sink.warn(&format!("Process exited with {}", exit));
        }

        debug!(
            pid = pid,
            lines_relayed = lines_relayed,
            exit_code = ?exit.code,
            duration_ms = duration_ms,
            "Child process finished"
        );

        Ok(RunReport {
            pid,
            lines_relayed,
            exit,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::log_sink::mocks::CapturingLogSink;
    use crate::port::process_launcher::mocks::{MockBehavior, ScriptedLauncher};
    use crate::port::time_provider::mocks::SteppingTimeProvider;
    use crate::port::LogLevel;

    fn runner_with(
        launcher: Arc<ScriptedLauncher>,
        sink: Arc<CapturingLogSink>,
    ) -> ProcessRunner {
        ProcessRunner::new(
            LaunchCommand::next_dev(),
            launcher,
            sink,
            Arc::new(SteppingTimeProvider::new(0, 40)),
        )
    }

    #[test]
    fn test_ready_scenario() {
        let sink = Arc::new(CapturingLogSink::new());
        let runner = runner_with(Arc::new(ScriptedLauncher::printing(["ready\n"])), sink.clone());

        let report = runner.run().expect("run should complete");

        assert_eq!(
            sink.entries(),
            vec![
                (
                    LogLevel::Info,
                    "Starting the Next.js development server...".to_string()
                ),
                (LogLevel::Info, "ready".to_string()),
            ]
        );
        assert_eq!(report.lines_relayed, 1);
        assert_eq!(report.exit, ExitOutcome::from_code(0));
        assert_eq!(report.duration_ms, 40);
    }

    #[test]
    fn test_relays_each_line_trimmed() {
        let sink = Arc::new(CapturingLogSink::new());
        let launcher = ScriptedLauncher::printing(["  compiled  /page \n", "done\t\r\n", "tail"]);
        let runner = runner_with(Arc::new(launcher), sink.clone());

        runner.run();

        let info = sink.messages(LogLevel::Info);
        assert_eq!(info.len(), 4);
        assert_eq!(&info[1..], &["  compiled  /page", "done", "tail"]);
        assert!(sink.messages(LogLevel::Error).is_empty());
    }

    #[test]
    fn test_no_output_still_returns() {
        let sink = Arc::new(CapturingLogSink::new());
        let runner = runner_with(
            Arc::new(ScriptedLauncher::printing(Vec::<String>::new())),
            sink.clone(),
        );

        let report = runner.run().unwrap();

        assert_eq!(report.lines_relayed, 0);
        assert_eq!(sink.entries().len(), 1);
    }

    #[test]
    fn test_command_not_found_logs_single_error() {
        let sink = Arc::new(CapturingLogSink::new());
        let runner = runner_with(
            Arc::new(ScriptedLauncher::new(MockBehavior::NotFound)),
            sink.clone(),
        );

        assert!(runner.run().is_none());
        assert_eq!(
            sink.messages(LogLevel::Error),
            vec![
                "Error: 'npm' command not found. Please ensure Node.js and npm are installed."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_spawn_failure_logs_description() {
        let sink = Arc::new(CapturingLogSink::new());
        let runner = runner_with(
            Arc::new(ScriptedLauncher::new(MockBehavior::SpawnFailure(
                "permission denied".to_string(),
            ))),
            sink.clone(),
        );

        assert!(runner.run().is_none());
        assert_eq!(
            sink.messages(LogLevel::Error),
            vec!["An error occurred while trying to start the server: permission denied".to_string()]
        );
    }

    #[test]
    fn test_read_failure_mid_stream() {
        let sink = Arc::new(CapturingLogSink::new());
        let runner = runner_with(
            Arc::new(ScriptedLauncher::new(MockBehavior::ReadFailure {
                lines: vec!["partial\n".to_string()],
                message: "broken pipe".to_string(),
            })),
            sink.clone(),
        );

        assert!(runner.run().is_none());
        assert_eq!(sink.messages(LogLevel::Info)[1], "partial");
        assert_eq!(sink.messages(LogLevel::Error).len(), 1);
    }

    #[test]
    fn test_try_run_returns_error_without_logging_it() {
        let sink = Arc::new(CapturingLogSink::new());
        let runner = runner_with(
            Arc::new(ScriptedLauncher::new(MockBehavior::NotFound)),
            sink.clone(),
        );

        let err = runner.try_run().unwrap_err();

        assert!(err.is_command_not_found());
        assert!(sink.messages(LogLevel::Error).is_empty());
    }

    #[test]
    fn test_non_zero_exit_is_a_warning() {
        let sink = Arc::new(CapturingLogSink::new());
        let runner = runner_with(
            Arc::new(ScriptedLauncher::new(MockBehavior::Exit {
                lines: vec!["boom\n".to_string()],
                code: 1,
            })),
            sink.clone(),
        );

        let report = runner.run().unwrap();

        assert_eq!(report.exit.code, Some(1));
        assert_eq!(
            sink.messages(LogLevel::Warn),
            vec!["Process exited with exit code 1".to_string()]
        );
        assert!(sink.messages(LogLevel::Error).is_empty());
    }

    #[test]
    fn test_signal_death_names_the_signal() {
        let sink = Arc::new(CapturingLogSink::new());
        let runner = runner_with(
            Arc::new(ScriptedLauncher::new(MockBehavior::Killed {
                lines: vec!["compiling\n".to_string()],
                signal: 9,
            })),
            sink.clone(),
        );

        let report = runner.run().unwrap();

        assert_eq!(report.exit.signal, Some(9));
        assert_eq!(
            sink.messages(LogLevel::Warn),
            vec!["Process exited with signal 9".to_string()]
        );
    }

    #[test]
    fn test_sequential_runs_are_independent() {
        let sink = Arc::new(CapturingLogSink::new());
        let launcher = Arc::new(ScriptedLauncher::printing(["one\n", "two\n"]));
        let runner = runner_with(launcher.clone(), sink.clone());

        let first = runner.run().unwrap();
        let first_entries = sink.take();
        let second = runner.run().unwrap();
        let second_entries = sink.take();

        assert_eq!(launcher.launch_count(), 2);
        assert_ne!(first.pid, second.pid);
        assert_eq!(first_entries, second_entries);
        assert_eq!(first_entries.len(), 3);
    }
}
