//! Secret storage errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum SecretError {
    /// No key has been stored in this session
    #[error("No API key stored")]
    NotStored,

    #[error("Encryption error: {message}")]
    Encrypt { message: String },

    #[error("Decryption error: {message}")]
    Decrypt { message: String },
}
