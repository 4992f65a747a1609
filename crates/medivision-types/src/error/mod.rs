//! Typed error definitions for MediVision.
//!
//! Every failure in a request is terminal for that request only. Errors are
//! caught at the boundary nearest their origin and carried as values, so they
//! are:
//!
//! - **Serializable** for handing to a front end via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for choosing how to surface them via `kind()`

mod gateway;
mod input;
mod secret;

pub use gateway::GatewayError;
pub use input::InputError;
pub use secret::SecretError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps a model gateway error
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Wraps a user input error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Wraps a secret storage error
    #[error("Secret error: {0}")]
    Secret(#[from] SecretError),
}

/// Coarse classification used to decide where and how an error is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Key failed format validation; the request is never attempted.
    InvalidApiKey,
    /// Unknown model id or provider rejected initialization.
    ModelInitializationFailure,
    /// Transport or provider failure while generating.
    GenerationFailure,
    /// Provider refused to answer on policy grounds.
    SafetyBlocked,
    /// Neither text nor image was supplied.
    MissingInput,
    /// Any other invalid user selection.
    InvalidInput,
    /// Stored key could not be read back.
    Secret,
}

impl TypedError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Gateway(e) => e.kind(),
            Self::Input(InputError::MissingInput) => ErrorKind::MissingInput,
            Self::Input(_) => ErrorKind::InvalidInput,
            Self::Secret(_) => ErrorKind::Secret,
        }
    }

    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            Self::Gateway(e) => e.user_message(),
            Self::Input(e) => e.to_string(),
            Self::Secret(SecretError::NotStored) => {
                "Please enter your Google API key first".to_string()
            },
            Self::Secret(e) => e.to_string(),
        }
    }
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = TypedError::Gateway(GatewayError::UnknownModel {
            model: "gemini-9".to_string(),
        });

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Gateway"));
        assert!(json.contains("gemini-9"));

        let deserialized: TypedError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(TypedError::from(GatewayError::InvalidApiKey).kind(), ErrorKind::InvalidApiKey);
        assert_eq!(
            TypedError::from(GatewayError::SafetyBlocked { reason: "SAFETY".to_string() }).kind(),
            ErrorKind::SafetyBlocked
        );
        assert_eq!(TypedError::from(InputError::MissingInput).kind(), ErrorKind::MissingInput);
        assert_eq!(TypedError::from(InputError::EmptyImage).kind(), ErrorKind::InvalidInput);
        assert_eq!(TypedError::from(SecretError::NotStored).kind(), ErrorKind::Secret);
    }

    #[test]
    fn test_missing_key_message() {
        let msg = TypedError::from(SecretError::NotStored).user_message();
        assert!(msg.contains("API key"));
    }
}
