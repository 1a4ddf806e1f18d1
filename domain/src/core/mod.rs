//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the inference model used for generation and filtering
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
