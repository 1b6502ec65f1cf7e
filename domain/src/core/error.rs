//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid temperature unit: {0} (expected \"C\" or \"F\")")]
    InvalidUnit(String),

    #[error("Empty message")]
    EmptyMessage,

    #[error("Invalid model settings: {0}")]
    InvalidModelSettings(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_unit_display() {
        let error = DomainError::InvalidUnit("K".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid temperature unit: K (expected \"C\" or \"F\")"
        );
    }

    #[test]
    fn test_empty_message_display() {
        assert_eq!(DomainError::EmptyMessage.to_string(), "Empty message");
    }
}
