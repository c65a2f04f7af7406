//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("Invalid collection policy: {0}")]
    InvalidPolicy(String),
}

impl DomainError {
    /// Whether this error was caused by caller input rather than system state
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidPrompt(_) | DomainError::InvalidPageRequest(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_prompt_display() {
        let error = DomainError::InvalidPrompt("empty".to_string());
        assert_eq!(error.to_string(), "Invalid prompt: empty");
    }

    #[test]
    fn test_is_client_error() {
        assert!(DomainError::InvalidPrompt("x".into()).is_client_error());
        assert!(DomainError::InvalidPageRequest("x".into()).is_client_error());
        assert!(!DomainError::InvalidPolicy("x".into()).is_client_error());
    }
}
