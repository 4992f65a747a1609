//! Unified error type for persistence and process-level failures.
//!
//! Pipeline failures are [`TypedError`] values; this type adds the I/O side
//! (config files, exports, image reads) around them.

use medivision_types::TypedError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Pipeline error (gateway, input, secret).
    #[error(transparent)]
    Typed(#[from] TypedError),

    /// File system I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            Self::Typed(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl From<medivision_types::GatewayError> for AppError {
    fn from(e: medivision_types::GatewayError) -> Self {
        Self::Typed(e.into())
    }
}

impl From<medivision_types::InputError> for AppError {
    fn from(e: medivision_types::InputError) -> Self {
        Self::Typed(e.into())
    }
}

impl From<medivision_types::SecretError> for AppError {
    fn from(e: medivision_types::SecretError) -> Self {
        Self::Typed(e.into())
    }
}

/// Result type alias for MediVision operations.
pub type AppResult<T> = Result<T, AppError>;
