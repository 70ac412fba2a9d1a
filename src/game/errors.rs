use thiserror::Error;

/// Errors returned by coordinator and squad operations
///
/// None of these are fatal. Every operation that returns an error leaves the
/// session exactly as it found it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Malformed or out-of-range input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A phase gate or other precondition is not satisfied
    #[error("Not allowed right now: {0}")]
    Precondition(String),

    /// The operation references an unknown player or squad
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Connection already registered: {0}")]
    DuplicateRegistration(String),
}

impl GameError {
    /// Stable reason code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            GameError::Validation(_) => "validation",
            GameError::Precondition(_) => "precondition",
            GameError::NotFound(_) => "not_found",
            GameError::DuplicateRegistration(_) => "duplicate_registration",
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        GameError::Validation(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        GameError::Precondition(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        GameError::NotFound(msg.into())
    }
}
