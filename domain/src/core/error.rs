//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tool name cannot be empty")]
    EmptyToolName,

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),
}
