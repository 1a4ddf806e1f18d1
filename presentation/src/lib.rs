//! Presentation layer for atoss-distill
//!
//! This crate contains CLI definitions, report formatters
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, ReportArg};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{BatchProgressReporter, SimpleProgress};
