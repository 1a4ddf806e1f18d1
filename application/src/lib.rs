//! Application layer for atoss-distill
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BatchParams, DEFAULT_RECORD_CAP, RetryPolicy, SplitParams};
pub use ports::{
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    progress::{BatchProgressNotifier, NoProgress},
    record_source::{DatasetError, RecordSource},
    split_sink::SplitSink,
};
pub use use_cases::filter_candidates::FilterCandidatesUseCase;
pub use use_cases::generate_candidates::GenerateCandidatesUseCase;
pub use use_cases::run_batch::{
    BatchReport, RecordOutcome, RecordStatus, RunBatchError, RunBatchInput, RunBatchUseCase,
};
pub use use_cases::shared::SplitError;
