//! Controller error types.

use thiserror::Error;

/// Errors from a scaling cycle.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("validation failed: {0}")]
    Validation(#[from] surge_core::ValidationError),

    #[error("fleet gateway error: {0}")]
    Gateway(#[from] surge_gateway::GatewayError),
}

impl ControllerError {
    /// Whether the caller may retry the whole read-decide-apply cycle.
    /// Validation failures never are; gateway failures depend on the
    /// provider's classification.
    pub fn is_retryable(&self) -> bool {
        match self {
            ControllerError::Validation(_) => false,
            ControllerError::Gateway(e) => e.is_retryable(),
        }
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;
