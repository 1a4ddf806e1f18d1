//! Split sink port
//!
//! Destination of the raw and final output lines. Both logs are append-only;
//! every successful append must be durable enough that a crash afterwards
//! keeps the line.

use atoss_domain::OutputLine;
use std::io;

/// Append-only writer for the raw and final logs
pub trait SplitSink: Send {
    /// Append one generated candidate to the raw log
    fn append_raw(&mut self, line: &OutputLine) -> io::Result<()>;

    /// Append one selected candidate to the final log
    fn append_final(&mut self, line: &OutputLine) -> io::Result<()>;

    /// Flush both logs
    fn flush(&mut self) -> io::Result<()>;
}
