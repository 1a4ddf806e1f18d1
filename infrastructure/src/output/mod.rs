//! Output adapters implementing the [`SplitSink`](atoss_application::SplitSink) port.

mod file_sink;

pub use file_sink::AppendFileSink;
