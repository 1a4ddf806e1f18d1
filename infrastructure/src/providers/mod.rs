//! Inference providers
//!
//! Adapters implementing the [`LlmGateway`](atoss_application::LlmGateway) port.

pub mod openai_compatible;

pub use openai_compatible::OpenAiCompatibleGateway;
