//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidInput`] thrown when setup or action parameters are invalid.
//! - [`InvalidPayee`] thrown when a `Name:Value` token cannot be parsed.
//! - [`KeyNotFound`] thrown when a configuration entry does not exist.
//! - [`Remote`] wrapping, untouched, whatever the Spliit client reported.
//!
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`InvalidPayee`]: EngineError::InvalidPayee
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Remote`]: EngineError::Remote
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid payee \"{token}\": {reason}")]
    InvalidPayee { token: String, reason: &'static str },
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("No participants found in group \"{0}\" to split evenly")]
    NoParticipants(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Action \"{0}\" is not registered")]
    ActionUnavailable(String),
    #[error("{0}")]
    Remote(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    /// Wraps a remote client failure without altering its message.
    pub fn remote<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Remote(Box::new(err))
    }

    /// Returns `true` for errors caused by the caller's input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InvalidPayee { .. }
                | Self::NoParticipants(_)
                | Self::UnknownCategory(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (
                Self::InvalidPayee {
                    token: a,
                    reason: ra,
                },
                Self::InvalidPayee {
                    token: b,
                    reason: rb,
                },
            ) => a == b && ra == rb,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::NoParticipants(a), Self::NoParticipants(b)) => a == b,
            (Self::UnknownCategory(a), Self::UnknownCategory(b)) => a == b,
            (Self::ActionUnavailable(a), Self::ActionUnavailable(b)) => a == b,
            (Self::Remote(a), Self::Remote(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
