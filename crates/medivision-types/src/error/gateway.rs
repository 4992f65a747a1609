//! Model gateway errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ErrorKind;

/// Errors raised while initializing a model or generating content.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum GatewayError {
    /// API key failed format validation
    #[error("Invalid API key format")]
    InvalidApiKey,

    /// Model identifier is not in the supported catalog
    #[error("Model {model} not found")]
    UnknownModel { model: String },

    /// Provider client could not be constructed
    #[error("Model initialization error: {message}")]
    InitializationFailed { message: String },

    /// Network-level failure (connect, TLS, body read)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Provider answered with a non-success status
    #[error("Provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Failure while reading the event stream
    #[error("Stream error: {message}")]
    Stream { message: String },

    /// Provider payload could not be decoded
    #[error("Invalid provider response: {message}")]
    Decode { message: String },

    /// Response was withheld by the provider's safety policy
    #[error("Response blocked by safety filters ({reason})")]
    SafetyBlocked { reason: String },

    /// Transport deadline exceeded
    #[error("Request timeout after {duration_secs}s")]
    Timeout { duration_secs: u64 },
}

impl GatewayError {
    /// Classify for surfacing.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidApiKey => ErrorKind::InvalidApiKey,
            Self::UnknownModel { .. } | Self::InitializationFailed { .. } => {
                ErrorKind::ModelInitializationFailure
            },
            Self::SafetyBlocked { .. } => ErrorKind::SafetyBlocked,
            Self::Transport { .. }
            | Self::Upstream { .. }
            | Self::Stream { .. }
            | Self::Decode { .. }
            | Self::Timeout { .. } => ErrorKind::GenerationFailure,
        }
    }

    /// Whether the error happened before any generation was attempted.
    pub fn is_initialization(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidApiKey | ErrorKind::ModelInitializationFailure
        )
    }

    pub fn is_safety_block(&self) -> bool {
        matches!(self, Self::SafetyBlocked { .. })
    }

    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidApiKey => "Invalid API key format".to_string(),
            Self::UnknownModel { .. } | Self::InitializationFailed { .. } => {
                format!("Failed to initialize model: {}", self)
            },
            Self::SafetyBlocked { .. } => {
                "The response was blocked by the provider's safety filters. Try rephrasing the query."
                    .to_string()
            },
            Self::Upstream { status: 400 | 401 | 403, message } => {
                format!("The provider rejected the request (check your API key): {}", message)
            },
            _ => format!("An error occurred during analysis: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_errors() {
        assert!(GatewayError::InvalidApiKey.is_initialization());
        assert!(GatewayError::UnknownModel { model: "x".to_string() }.is_initialization());
        assert!(!GatewayError::Timeout { duration_secs: 5 }.is_initialization());
    }

    #[test]
    fn test_safety_block_distinct_from_failure() {
        let blocked = GatewayError::SafetyBlocked { reason: "SAFETY".to_string() };
        let failed = GatewayError::Stream { message: "reset".to_string() };

        assert!(blocked.is_safety_block());
        assert!(!failed.is_safety_block());
        assert_ne!(blocked.kind(), failed.kind());
    }

    #[test]
    fn test_upstream_auth_message() {
        let err = GatewayError::Upstream { status: 403, message: "API key not valid".to_string() };
        assert!(err.user_message().contains("check your API key"));
    }
}
