//! Core domain models for MediVision.
//!
//! This module contains the fixed catalogs and the data structures shared by
//! the pipeline and any front end.

mod catalog;
pub mod config;
mod history;
mod stats;

pub use catalog::{
    find_model, is_supported_language, language_code, ModelSpec, DEFAULT_LANGUAGE,
    DEFAULT_MODEL, MODEL_CATALOG, SUPPORTED_LANGUAGES,
};
pub use config::{AppConfig, CostRates, GenerationSettings, ImageFormat, InputMode};
pub use history::{HistoryEntry, HistorySummary};
pub use stats::{format_cost, format_token_count, FeedbackStats, UsageStats};
