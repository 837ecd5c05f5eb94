// Application Layer - Use Cases

pub mod runner;

// Re-exports
pub use runner::{ProcessRunner, RunReport};
