//! Provider wire formats.

pub mod gemini;

pub use gemini::{
    Candidate, Content, FinishReason, GeminiInlineData, GeminiPart, GeminiRole,
    GeminiUsageMetadata, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    PromptFeedback, SafetySetting, SAFETY_FINISH_CODE,
};
