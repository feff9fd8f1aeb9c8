//! Application-level errors

use council_domain::DomainError;
use thiserror::Error;

/// Errors a pattern can return instead of a result.
///
/// Agent failures are not errors: they come back inside the result as
/// failed responses. These variants cover what stops a pattern from
/// producing any result at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestrationError {
    /// Bad arguments, reported before any process is spawned
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    /// The caller cancelled the call; outstanding invocations were stopped
    #[error("Cancelled by caller")]
    Cancelled,
}

impl OrchestrationError {
    pub fn is_validation(&self) -> bool {
        matches!(self, OrchestrationError::Validation(_))
    }
}
