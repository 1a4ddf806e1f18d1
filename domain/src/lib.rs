//! Domain layer for atoss-distill
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Aspect-Term-Oriented Sentence Splitting (ATOSS)
//!
//! A review sentence annotated with `[aspect, category, sentiment, opinion]`
//! quadruplets is rewritten into shorter sentences so that each one carries
//! exactly one aspect term:
//!
//! - **Generation**: the model proposes several candidate splits
//! - **Filtering**: the model selects the best K candidates
//!
//! Both steps are driven by the prompt templates in [`prompt`]; model output is
//! cleaned up by [`split`] (line handling) and [`text`] (escape decoding).

pub mod config;
pub mod core;
pub mod prompt;
pub mod record;
pub mod session;
pub mod split;
pub mod text;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, ReportFormat, Severity};
pub use core::{error::DomainError, model::Model};
pub use prompt::SplitPromptTemplate;
pub use record::{
    entities::{Aspects, Quadruplet, Record},
    output_line::{OUTPUT_SEPARATOR, OutputLine},
};
pub use session::entities::{Message, Role};
pub use split::{Collected, SplitPhase, parse_selections, single_line};
pub use text::{DecodeError, decode_escapes, normalize};
