// Domain Error Types

use thiserror::Error;

/// Failures of a launch, from spawn through the final wait
///
/// Both variants are handled by logging; neither is escalated.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Error: '{program}' command not found. {hint}")]
    CommandNotFound { program: String, hint: String },

    #[error("An error occurred while trying to start the server: {0}")]
    UnspecifiedLaunchFailure(#[source] std::io::Error),
}

impl LaunchError {
    /// Classify an error returned by the OS when spawning `command`
    pub fn from_spawn(command: &crate::domain::LaunchCommand, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            LaunchError::CommandNotFound {
                program: command.program().to_string(),
                hint: command.missing_hint().to_string(),
            }
        } else {
            LaunchError::UnspecifiedLaunchFailure(err)
        }
    }

    pub fn is_command_not_found(&self) -> bool {
        matches!(self, LaunchError::CommandNotFound { .. })
    }
}

impl From<std::io::Error> for LaunchError {
    fn from(err: std::io::Error) -> Self {
        LaunchError::UnspecifiedLaunchFailure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LaunchCommand;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_not_found_maps_to_command_not_found() {
        let err = LaunchError::from_spawn(
            &LaunchCommand::next_dev(),
            Error::new(ErrorKind::NotFound, "no such file"),
        );

        assert!(err.is_command_not_found());
        assert_eq!(
            err.to_string(),
            "Error: 'npm' command not found. Please ensure Node.js and npm are installed."
        );
    }

    #[test]
    fn test_other_spawn_errors_are_unspecified() {
        let err = LaunchError::from_spawn(
            &LaunchCommand::next_dev(),
            Error::new(ErrorKind::PermissionDenied, "permission denied"),
        );

        assert!(!err.is_command_not_found());
        assert_eq!(
            err.to_string(),
            "An error occurred while trying to start the server: permission denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
