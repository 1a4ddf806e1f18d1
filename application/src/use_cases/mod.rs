//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod filter_candidates;
pub mod generate_candidates;
pub mod run_batch;
pub(crate) mod shared;
