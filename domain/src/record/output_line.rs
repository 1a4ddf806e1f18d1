//! Persisted output line format

use crate::split::single_line;
use std::fmt;

/// Separator between the original sentence and its split variant.
pub const OUTPUT_SEPARATOR: &str = "####";

/// A `sentence####variant` line for the raw and final logs (Value Object)
///
/// The variant is flattened to a single line on construction so one line in
/// the file always corresponds to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    sentence: String,
    variant: String,
}

impl OutputLine {
    pub fn new(sentence: impl Into<String>, variant: &str) -> Self {
        Self {
            sentence: sentence.into(),
            variant: single_line(variant),
        }
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Parse a line previously written by [`OutputLine::render`]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let (sentence, variant) = line.split_once(OUTPUT_SEPARATOR)?;
        Some(Self {
            sentence: sentence.to_string(),
            variant: variant.to_string(),
        })
    }

    /// Render as a newline-terminated log line
    pub fn render(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.sentence, OUTPUT_SEPARATOR, self.variant)
    }
}
