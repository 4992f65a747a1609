//! Application-level configuration.

use serde::{Deserialize, Serialize};

use crate::models::catalog::{DEFAULT_LANGUAGE, DEFAULT_MODEL};
use crate::protocol::{GenerationConfig, SafetySetting};

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Harm categories the safety threshold is applied to.
pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Per-1000-token pricing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CostRates {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl CostRates {
    /// Free tier: no charge for either direction.
    pub const FREE: CostRates = CostRates { input_per_1k: 0.0, output_per_1k: 0.0 };
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { temperature: 0.7, top_p: 0.9, top_k: 40, max_output_tokens: 4096 }
    }
}

impl GenerationSettings {
    /// Wire form, with output tokens clamped to the model's limit.
    pub fn to_wire(self, model_max_tokens: u32) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens.min(model_max_tokens),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Model display name used when none is given
    pub default_model: String,
    /// Output language used when none is given
    pub default_language: String,
    /// Maximum history entries kept per session
    pub history_limit: usize,
    pub cost: CostRates,
    pub generation: GenerationSettings,
    /// Blocking threshold applied to every harm category
    pub safety_threshold: String,
    pub api_base_url: String,
    /// Transport deadline for a single request
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            history_limit: 10,
            cost: CostRates::FREE,
            generation: GenerationSettings::default(),
            safety_threshold: "BLOCK_ONLY_HIGH".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 120,
        }
    }

    pub fn safety_settings(&self) -> Vec<SafetySetting> {
        HARM_CATEGORIES
            .iter()
            .map(|category| SafetySetting {
                category: (*category).to_string(),
                threshold: self.safety_threshold.clone(),
            })
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
