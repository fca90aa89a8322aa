// ABOUTME: Library root for stagecoach - exposes the pipeline engine for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod runtime;
pub mod stage;
pub mod types;
