//! Fixed catalogs: supported models and output languages.

use serde::Serialize;

/// One entry of the supported model catalog.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ModelSpec {
    /// Name shown to users and stored in history
    pub display_name: &'static str,
    /// Provider model identifier
    pub id: &'static str,
    pub provider: &'static str,
    /// Maximum output tokens the model accepts
    pub max_tokens: u32,
    pub description: &'static str,
}

/// Free-tier Gemini models.
pub const MODEL_CATALOG: &[ModelSpec] = &[
    ModelSpec {
        display_name: "Gemini 2.5 Pro",
        id: "gemini-2.5-pro",
        provider: "google",
        max_tokens: 8192,
        description: "🧠 Advanced thinking, complex reasoning",
    },
    ModelSpec {
        display_name: "Gemini 2.5 Flash",
        id: "gemini-2.5-flash",
        provider: "google",
        max_tokens: 8192,
        description: "⚡ Best balance of speed & quality",
    },
    ModelSpec {
        display_name: "Gemini 2.5 Flash-Lite",
        id: "gemini-2.5-flash-lite",
        provider: "google",
        max_tokens: 8192,
        description: "🚀 Ultra fast, most cost-efficient",
    },
    ModelSpec {
        display_name: "Gemini 2.0 Flash",
        id: "gemini-2.0-flash",
        provider: "google",
        max_tokens: 8192,
        description: "💪 Workhorse with 1M context",
    },
    ModelSpec {
        display_name: "Gemini 2.0 Flash-Lite",
        id: "gemini-2.0-flash-lite",
        provider: "google",
        max_tokens: 8192,
        description: "⚙️ Small & efficient, 1M context",
    },
];

pub const DEFAULT_MODEL: &str = "Gemini 2.5 Flash-Lite";

pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "English",
    "Hindi",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Japanese",
    "Chinese",
    "Arabic",
    "Russian",
    "Korean",
];

pub const DEFAULT_LANGUAGE: &str = "English";

/// Look up a model by display name or provider id.
pub fn find_model(name: &str) -> Option<&'static ModelSpec> {
    let name = name.trim();
    MODEL_CATALOG
        .iter()
        .find(|spec| spec.display_name == name || spec.id.eq_ignore_ascii_case(name))
}

pub fn is_supported_language(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

/// Two-letter upper-case tag used in titles: "English" -> "EN".
pub fn language_code(language: &str) -> String {
    language.chars().take(2).collect::<String>().to_uppercase()
}
