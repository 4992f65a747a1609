//! Google Gemini GenerateContent API types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric finish-reason code the provider reserves for safety-policy rejection.
///
/// Mirrors `FinishReason.SAFETY` in the GenerateContent API. Confirm against
/// the live enumeration when moving to a new API version.
pub const SAFETY_FINISH_CODE: i32 = 3;

/// Gemini content role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum GeminiRole {
    User,
    Model,
}

/// Gemini content part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(alias = "inlineData")]
        inline_data: GeminiInlineData,
    },
    /// Function calls, thoughts without text, and anything newer than this client.
    Other(serde_json::Value),
}

impl GeminiPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Text carried by this part, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text.as_str()),
            Self::InlineData { .. } | Self::Other(_) => None,
        }
    }
}

/// Gemini inline data (for images, etc). `data` is base64.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeminiInlineData {
    #[serde(alias = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// One turn of conversation content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<GeminiRole>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Sampling parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

/// Per-category blocking threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

/// Request body for `generateContent` / `streamGenerateContent`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

/// Why the provider stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinishReason {
    Unspecified,
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other,
    Blocklist,
    ProhibitedContent,
    Spii,
    MalformedFunctionCall,
    /// A code or name this client does not know about.
    Unrecognized(i32),
}

impl FinishReason {
    /// Protocol enumeration value.
    pub fn code(self) -> i32 {
        match self {
            Self::Unspecified => 0,
            Self::Stop => 1,
            Self::MaxTokens => 2,
            Self::Safety => SAFETY_FINISH_CODE,
            Self::Recitation => 4,
            Self::Other => 5,
            Self::Blocklist => 6,
            Self::ProhibitedContent => 7,
            Self::Spii => 8,
            Self::MalformedFunctionCall => 9,
            Self::Unrecognized(code) => code,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Unspecified,
            1 => Self::Stop,
            2 => Self::MaxTokens,
            SAFETY_FINISH_CODE => Self::Safety,
            4 => Self::Recitation,
            5 => Self::Other,
            6 => Self::Blocklist,
            7 => Self::ProhibitedContent,
            8 => Self::Spii,
            9 => Self::MalformedFunctionCall,
            other => Self::Unrecognized(other),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "FINISH_REASON_UNSPECIFIED" => Self::Unspecified,
            "STOP" => Self::Stop,
            "MAX_TOKENS" => Self::MaxTokens,
            "SAFETY" => Self::Safety,
            "RECITATION" => Self::Recitation,
            "OTHER" => Self::Other,
            "BLOCKLIST" => Self::Blocklist,
            "PROHIBITED_CONTENT" => Self::ProhibitedContent,
            "SPII" => Self::Spii,
            "MALFORMED_FUNCTION_CALL" => Self::MalformedFunctionCall,
            _ => Self::Unrecognized(-1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "FINISH_REASON_UNSPECIFIED",
            Self::Stop => "STOP",
            Self::MaxTokens => "MAX_TOKENS",
            Self::Safety => "SAFETY",
            Self::Recitation => "RECITATION",
            Self::Other => "OTHER",
            Self::Blocklist => "BLOCKLIST",
            Self::ProhibitedContent => "PROHIBITED_CONTENT",
            Self::Spii => "SPII",
            Self::MalformedFunctionCall => "MALFORMED_FUNCTION_CALL",
            Self::Unrecognized(_) => "UNRECOGNIZED",
        }
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FinishReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unrecognized(code) => serializer.serialize_i32(*code),
            known => serializer.serialize_str(known.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for FinishReason {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // REST returns enum names, some SDK dumps carry the numeric value.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i32),
            Name(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Self::from_code(code),
            Raw::Name(name) => Self::from_name(&name),
        })
    }
}

/// One generated alternative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
    #[serde(default)]
    pub index: Option<u32>,
}

/// Feedback about the prompt itself (set when the prompt was refused outright).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Gemini usage metadata.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
    #[serde(default)]
    pub cached_content_token_count: u32,
}

/// A full response, or one event of a streamed response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<GeminiUsageMetadata>,
    /// Flattened text, present only in some SDK-shaped payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
