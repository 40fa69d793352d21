use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("external service error: {0}")]
    ExternalServiceError(String),

    #[error("perception service error: {0}")]
    PerceptionServiceError(String),

    #[error("reasoning service error: {0}")]
    ReasoningServiceError(String),

    #[error("invalid pipeline transition from {from} on {event}")]
    InvalidStateTransition { from: String, event: String },
}

impl CoreError {
    /// Text of the underlying failure without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            CoreError::ConfigurationError(detail)
            | CoreError::InvalidImage(detail)
            | CoreError::ExternalServiceError(detail)
            | CoreError::PerceptionServiceError(detail)
            | CoreError::ReasoningServiceError(detail) => detail.clone(),
            CoreError::InvalidStateTransition { .. } => self.to_string(),
        }
    }
}
