//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent rule violations on cast entries and results.
/// These are independent of transport concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid cast entry {input:?}: {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("invalid line value: {0:?}")]
    InvalidLineValue(char),
}

impl DomainError {
    pub fn invalid_input(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
