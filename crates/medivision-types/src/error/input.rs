//! User input errors. Raised before any network call is made.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum InputError {
    #[error("Please provide either text input or upload an image")]
    MissingInput,

    #[error("Unsupported image format: {format} (expected png, jpg or jpeg)")]
    UnsupportedImageFormat { format: String },

    #[error("Uploaded image is empty")]
    EmptyImage,

    #[error("Unsupported language: {language}")]
    UnknownLanguage { language: String },

    #[error("Unknown input mode: {mode}")]
    UnknownInputMode { mode: String },

    #[error("Unknown prompt style: {style}")]
    UnknownStyle { style: String },

    #[error("Unknown regeneration option: {option}")]
    UnknownRegeneration { option: String },

    #[error("Nothing to regenerate yet, run an analysis first")]
    NothingToRegenerate,
}
