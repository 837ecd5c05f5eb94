// Launch Command Domain Model

/// Default program for the Next.js dev server
pub const DEFAULT_PROGRAM: &str = "npm";

/// Default arguments (`npm run dev`, defined in package.json)
pub const DEFAULT_ARGS: [&str; 2] = ["run", "dev"];

/// Startup banner logged before spawning
pub const DEFAULT_BANNER: &str = "Starting the Next.js development server...";

/// Remediation appended to the "command not found" error
pub const DEFAULT_MISSING_HINT: &str = "Please ensure Node.js and npm are installed.";

const GENERIC_MISSING_HINT: &str = "Please ensure it is installed and available on PATH.";

/// A fixed external command the runner knows how to start
///
/// The binary only ever uses [`LaunchCommand::next_dev`]; other commands
/// are built with [`LaunchCommand::new`] (tests, stubs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    program: String,
    args: Vec<String>,
    banner: String,
    missing_hint: String,
}

impl LaunchCommand {
    /// Create a command with a generic banner and remediation hint
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = program.into();
        Self {
            banner: format!("Starting '{}'...", program),
            missing_hint: GENERIC_MISSING_HINT.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            program,
        }
    }

    /// `npm run dev`
    pub fn next_dev() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_ARGS)
            .with_banner(DEFAULT_BANNER)
            .with_missing_hint(DEFAULT_MISSING_HINT)
    }

    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    pub fn with_missing_hint(mut self, hint: impl Into<String>) -> Self {
        self.missing_hint = hint.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }

    pub fn missing_hint(&self) -> &str {
        &self.missing_hint
    }
}

impl Default for LaunchCommand {
    fn default() -> Self {
        Self::next_dev()
    }
}

impl std::fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
