//! Shared helpers for the end-to-end tests

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use devlaunch_core::port::log_sink::mocks::CapturingLogSink;
use devlaunch_core::port::time_provider::SystemTimeProvider;
use devlaunch_core::{LaunchCommand, ProcessRunner};
use devlaunch_infra_system::SubprocessLauncher;

/// Banner of the default Next.js command
pub const NEXT_DEV_BANNER: &str = "Starting the Next.js development server...";

/// `sh -c <script>` announced with the Next.js banner, standing in for `npm run dev`
pub fn sh_stub(script: &str) -> LaunchCommand {
    LaunchCommand::new("sh", ["-c", script]).with_banner(NEXT_DEV_BANNER)
}

/// Runner wired to the real OS launcher and a capturing sink
pub fn real_runner(command: LaunchCommand) -> (ProcessRunner, Arc<CapturingLogSink>) {
    let sink = Arc::new(CapturingLogSink::new());
    let runner = ProcessRunner::new(
        command,
        Arc::new(SubprocessLauncher::new()),
        sink.clone(),
        Arc::new(SystemTimeProvider),
    );
    (runner, sink)
}

/// One event seen by [`EventCapture`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl CapturedEvent {
    pub fn new(level: Level, target: &str, message: &str) -> Self {
        Self {
            level,
            target: target.to_string(),
            message: message.to_string(),
        }
    }
}

/// Layer recording every event that passes the subscriber's filters
#[derive(Debug, Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.0,
        });
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}
