//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`SplitParams`]: sampling, counts, concurrency and call policy for one record
//! - [`BatchParams`]: limits for one batch run

pub mod batch_params;
pub mod split_params;

pub use batch_params::{BatchParams, DEFAULT_RECORD_CAP};
pub use split_params::{RetryPolicy, SplitParams};
