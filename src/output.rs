// ABOUTME: Progress reporting port and its CLI implementation.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use crate::stage::StageKind;
use crate::types::StageName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

/// User-facing progress events emitted while a pipeline runs.
///
/// Passed explicitly to the coordinator and the runners; diagnostics go to
/// `tracing` instead.
pub trait Progress: Send + Sync {
    /// A pipeline phase begins (overlays, building, deploying).
    fn phase(&self, title: &str);

    /// Stage `position` of `total` (1-based) begins.
    fn stage(&self, kind: StageKind, position: usize, total: usize, name: &StageName);

    /// A step inside the current stage.
    fn step(&self, message: &str);

    /// Something went wrong that does not fail the pipeline.
    fn warning(&self, message: &str);
}

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result and warnings)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print an informational line (suppressed in quiet/json mode).
    pub fn info(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({elapsed:.1}s)");
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => self.emit(JsonEvent::new("success", message).timed(self)),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => {
                let event = JsonEvent::new("error", message).timed(self);
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn emit(&self, event: JsonEvent<'_>) {
        if let Ok(json) = serde_json::to_string(&event) {
            println!("{json}");
        }
    }
}

impl Progress for Output {
    fn phase(&self, title: &str) {
        match self.mode {
            OutputMode::Normal => println!("=== {title} ==="),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit(JsonEvent::new("phase", title)),
        }
    }

    fn stage(&self, kind: StageKind, position: usize, total: usize, name: &StageName) {
        match self.mode {
            OutputMode::Normal => println!("{} {position}/{total}: {name}", kind.verb()),
            OutputMode::Quiet => {}
            OutputMode::Json => {
                let mut event = JsonEvent::new("stage", name.as_str());
                event.kind = Some(kind.as_str());
                event.position = Some(position);
                event.total = Some(total);
                self.emit(event);
            }
        }
    }

    fn step(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("  → {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit(JsonEvent::new("step", message)),
        }
    }

    fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => self.emit(JsonEvent::new("warning", message)),
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

impl<'a> JsonEvent<'a> {
    fn new(event: &'a str, message: &'a str) -> Self {
        Self {
            event,
            message,
            timestamp: Utc::now(),
            kind: None,
            position: None,
            total: None,
            duration_secs: None,
        }
    }

    fn timed(mut self, output: &Output) -> Self {
        if output.start_time.is_some() {
            self.duration_secs = Some(output.elapsed_secs());
        }
        self
    }
}
