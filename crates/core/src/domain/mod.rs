// Domain Layer - Launch command, errors, output handling

pub mod command;
pub mod error;
pub mod output;

// Re-exports
pub use command::LaunchCommand;
pub use error::LaunchError;
pub use output::normalize_line;
