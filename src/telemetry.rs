//! Application telemetry events and sinks.
//!
//! Task flow runs locally, but structured events still help when debugging
//! what a command did against a project.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by task flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// The viewer's projects were listed.
    ProjectsListed {
        /// Number of projects returned.
        count: usize,
    },
    /// A project's fields and tasks were loaded and normalized.
    ProjectDataLoaded {
        /// Project node id.
        project_id: String,
        /// Tasks kept after normalization.
        tasks: usize,
        /// Field definitions on the project.
        fields: usize,
    },
    /// An issue or draft issue was created.
    TaskCreated {
        /// Issue number, `0` for drafts.
        number: u64,
        /// Whether the task is a draft issue.
        draft: bool,
    },
    /// A custom field value was set or cleared.
    FieldUpdated {
        /// Project item id.
        item_id: String,
        /// Whether the value was cleared.
        cleared: bool,
    },
    /// A task branch was created or checked out.
    BranchCheckedOut {
        /// Branch name.
        name: String,
        /// Whether the branch was created by this run.
        created: bool,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
