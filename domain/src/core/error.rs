//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Sentence cannot be empty")]
    EmptySentence,

    #[error("Invalid quadruplet: {0}")]
    InvalidQuadruplet(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::EmptySentence.to_string(),
            "Sentence cannot be empty"
        );
        assert_eq!(
            DomainError::InvalidQuadruplet("expected 4 fields".to_string()).to_string(),
            "Invalid quadruplet: expected 4 fields"
        );
    }
}
