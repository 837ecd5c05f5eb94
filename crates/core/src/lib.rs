// devlaunch Core - Domain Logic & Ports
// NO process spawning here; the OS adapter lives in infra-system

pub mod application;
pub mod domain;
pub mod port;

pub use application::{ProcessRunner, RunReport};
pub use domain::{LaunchCommand, LaunchError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
