use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("domain entity `{entity}` not found")]
    NotFound { entity: &'static str },
    #[error("{message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// User-facing message when this failure is a validation rejection.
    pub fn validation_message(&self) -> Option<&str> {
        match self {
            Self::Validation { message } => Some(message),
            Self::NotFound { .. } => None,
        }
    }
}
