//! Prompt domain
//!
//! Templates for the generation and filtering calls of the split flow.

mod template;

pub use template::SplitPromptTemplate;
