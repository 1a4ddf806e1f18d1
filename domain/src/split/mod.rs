//! Split domain
//!
//! Pure helpers around candidate splits: turning free-form completions into
//! single-line candidates, parsing the filter's selection list, and the
//! [`Collected`] outcome that records whether the expected count was met.

mod outcome;
mod parsing;
mod phase;

pub use outcome::Collected;
pub use parsing::{parse_selections, single_line};
pub use phase::SplitPhase;
