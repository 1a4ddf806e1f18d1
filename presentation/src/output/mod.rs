//! Output formatting for run reports

pub mod console;
