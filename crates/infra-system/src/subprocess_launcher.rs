// Subprocess launcher implementation
// reason: std::process + std::io::pipe give a single merged stdout/stderr stream
use std::io::{BufRead, BufReader, PipeReader};
use std::process::{Child, Command};
use tracing::debug;

use devlaunch_core::domain::{LaunchCommand, LaunchError};
use devlaunch_core::port::{ExitOutcome, LaunchedProcess, ProcessLauncher};

/// Spawns real OS processes
///
/// The child inherits stdin, the environment and the working directory.
/// stdout and stderr share one pipe, so lines arrive in the order the
/// child wrote them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubprocessLauncher;

impl SubprocessLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Spawn with both output channels on the write end of one pipe
    fn spawn_merged(command: &LaunchCommand) -> std::io::Result<(Child, PipeReader)> {
        let (reader, writer) = std::io::pipe()?;

        // The Command holds the write ends; it is a temporary so they are
        // closed right after spawn and EOF arrives when the child exits.
        let child = Command::new(command.program())
            .args(command.args())
            .stdout(writer.try_clone()?)
            .stderr(writer)
            .spawn()?;

        Ok((child, reader))
    }
}

impl ProcessLauncher for SubprocessLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<Box<dyn LaunchedProcess>, LaunchError> {
        let (child, reader) =
            Self::spawn_merged(command).map_err(|e| LaunchError::from_spawn(command, e))?;

        debug!(
            pid = child.id(),
            command = %command,
            "Child process spawned"
        );

        Ok(Box::new(SubprocessHandle {
            child,
            output: BufReader::new(reader),
        }))
    }
}

/// A spawned child and the read end of its merged output
struct SubprocessHandle {
    child: Child,
    output: BufReader<PipeReader>,
}

impl LaunchedProcess for SubprocessHandle {
    fn pid(&self) -> u32 {
        self.child.id()
    }

    fn next_line(&mut self) -> Result<Option<Vec<u8>>, LaunchError> {
        let mut line = Vec::new();
        let read = self.output.read_until(b'\n', &mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn wait(&mut self) -> Result<ExitOutcome, LaunchError> {
        let status = self.child.wait()?;
        debug!(pid = self.child.id(), status = %status, "Child process exited");

        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Ok(ExitOutcome {
            code: status.code(),
            signal,
            success: status.success(),
        })
    }
}
