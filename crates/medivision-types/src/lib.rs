//! # MediVision Types
//!
//! Core types, catalogs and error definitions for MediVision.
//!
//! - **`error`** - Typed error hierarchy for the gateway, user input and secret storage
//! - **`models`** - Domain models (catalogs, config, history, usage)
//! - **`protocol`** - Gemini `generateContent` wire types
//!
//! ## Architecture Role
//!
//! ```text
//!     medivision-types (this crate)
//!              │
//!              ▼
//!       medivision-core
//!              │
//!              ▼
//!       medivision-cli
//! ```
//!
//! Nothing in this crate performs I/O. All types are serializable via serde
//! so they can be persisted or handed to another front end unchanged.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::{ErrorKind, GatewayError, InputError, Result, SecretError, TypedError};

pub use models::{
    AppConfig, CostRates, FeedbackStats, GenerationSettings, HistoryEntry, HistorySummary,
    ImageFormat, InputMode, ModelSpec, UsageStats,
};
