//! Dataset records and persisted output lines.
//!
//! - [`entities::Record`]: one annotated review sentence
//! - [`entities::Quadruplet`]: `[aspect, category, sentiment, opinion]`
//! - [`output_line::OutputLine`]: `sentence####variant` log line

pub mod entities;
pub mod output_line;
