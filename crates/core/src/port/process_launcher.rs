// Process Launcher Port
// Abstraction over OS process creation with a merged output stream

use crate::domain::{LaunchCommand, LaunchError};

/// How a child process terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Terminating signal (unix only)
    pub signal: Option<i32>,
    pub success: bool,
}

impl ExitOutcome {
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
            success: code == 0,
        }
    }

    pub fn from_signal(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
            success: false,
        }
    }
}

impl std::fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit code {}", code),
            (None, Some(signal)) => write!(f, "signal {}", signal),
            (None, None) => write!(f, "no exit code (terminated by signal)"),
        }
    }
}

/// Handle to a running child, exclusively owned by one run
pub trait LaunchedProcess {
    /// OS process identifier
    fn pid(&self) -> u32;

    /// Next raw line from the merged stdout/stderr stream
    ///
    /// Returns the bytes up to and including `\n` (the last line may lack
    /// it), or `None` once the child closed its output. Blocks until a
    /// line is available.
    fn next_line(&mut self) -> Result<Option<Vec<u8>>, LaunchError>;

    /// Block until the child exits
    fn wait(&mut self) -> Result<ExitOutcome, LaunchError>;
}

/// Process launcher trait
///
/// Implementations:
/// - SubprocessLauncher (infra-system): spawns a real OS process
/// - mocks::ScriptedLauncher: replays scripted output
pub trait ProcessLauncher: Send + Sync {
    /// Spawn `command` with stdout and stderr merged
    ///
    /// # Errors
    /// - LaunchError::CommandNotFound if the program is not on PATH
    /// - LaunchError::UnspecifiedLaunchFailure for any other spawn failure
    fn launch(&self, command: &LaunchCommand) -> Result<Box<dyn LaunchedProcess>, LaunchError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{Error, ErrorKind};
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

    /// Scripted launcher behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Print lines (raw, newline included if wanted), then exit with code
        Exit { lines: Vec<String>, code: i32 },
        /// Print lines, then die from a signal
        Killed { lines: Vec<String>, signal: i32 },
        /// Print lines, then fail the next read
        ReadFailure { lines: Vec<String>, message: String },
        /// Program not found on PATH
        NotFound,
        /// Spawn fails for another reason
        SpawnFailure(String),
    }

    /// Launcher that never touches the OS
    pub struct ScriptedLauncher {
        behavior: MockBehavior,
        launch_count: AtomicUsize,
        next_pid: AtomicU32,
    }

    impl ScriptedLauncher {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                launch_count: AtomicUsize::new(0),
                next_pid: AtomicU32::new(1000),
            }
        }

        /// Print `lines` and exit 0
        pub fn printing<I, S>(lines: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self::new(MockBehavior::Exit {
                lines: lines.into_iter().map(Into::into).collect(),
                code: 0,
            })
        }

        pub fn launch_count(&self) -> usize {
            self.launch_count.load(Ordering::SeqCst)
        }
    }

    impl ProcessLauncher for ScriptedLauncher {
        fn launch(
            &self,
            command: &LaunchCommand,
        ) -> Result<Box<dyn LaunchedProcess>, LaunchError> {
            self.launch_count.fetch_add(1, Ordering::SeqCst);
            let pid = self.next_pid.fetch_add(1, Ordering::SeqCst);

            let (lines, outcome) = match &self.behavior {
                MockBehavior::Exit { lines, code } => (lines, Ok(ExitOutcome::from_code(*code))),
                MockBehavior::Killed { lines, signal } => {
                    (lines, Ok(ExitOutcome::from_signal(*signal)))
                }
                MockBehavior::ReadFailure { lines, message } => (lines, Err(message.clone())),
                MockBehavior::NotFound => {
                    return Err(LaunchError::from_spawn(
                        command,
                        Error::new(ErrorKind::NotFound, "No such file or directory"),
                    ))
                }
                MockBehavior::SpawnFailure(message) => {
                    return Err(LaunchError::from_spawn(
                        command,
                        Error::new(ErrorKind::PermissionDenied, message.clone()),
                    ))
                }
            };

            Ok(Box::new(ScriptedProcess {
                pid,
                lines: lines.iter().map(|l| l.clone().into_bytes()).collect(),
                outcome,
            }))
        }
    }

    struct ScriptedProcess {
        pid: u32,
        lines: VecDeque<Vec<u8>>,
        outcome: Result<ExitOutcome, String>,
    }

    impl LaunchedProcess for ScriptedProcess {
        fn pid(&self) -> u32 {
            self.pid
        }

        fn next_line(&mut self) -> Result<Option<Vec<u8>>, LaunchError> {
            if let Some(line) = self.lines.pop_front() {
                return Ok(Some(line));
            }
            match &self.outcome {
                Ok(_) => Ok(None),
                Err(message) => Err(LaunchError::UnspecifiedLaunchFailure(Error::other(
                    message.clone(),
                ))),
            }
        }

        fn wait(&mut self) -> Result<ExitOutcome, LaunchError> {
            match &self.outcome {
                Ok(outcome) => Ok(*outcome),
                Err(message) => Err(LaunchError::UnspecifiedLaunchFailure(Error::other(
                    message.clone(),
                ))),
            }
        }
    }
}
