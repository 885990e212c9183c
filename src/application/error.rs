use thiserror::Error;

use crate::application::gateway::GatewayError;
use crate::domain::error::DomainError;

/// Umbrella failure type for application operations.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl AppError {
    /// User-facing message when the failure is a validation rejection,
    /// which callers surface to the operator instead of logging.
    pub fn validation_message(&self) -> Option<&str> {
        match self {
            Self::Domain(domain) => domain.validation_message(),
            Self::Gateway(_) => None,
        }
    }
}
