//! Inspection of provider responses: safety blocks, validity, text extraction.

use medivision_types::protocol::{GenerateContentResponse, SAFETY_FINISH_CODE};

/// Text carried by one response, with parts taking precedence over the flat field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseText {
    /// First candidate had a non-empty parts list; texts of the parts that carry text.
    Parts(Vec<String>),
    /// No parts, but a flattened text field was present.
    Flat(String),
    Empty,
}

impl ResponseText {
    pub fn from_response(response: &GenerateContentResponse) -> Self {
        let parts = response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default();

        if !parts.is_empty() {
            return Self::Parts(
                parts
                    .iter()
                    .filter_map(|p| p.as_text())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }

        match &response.text {
            Some(text) if !text.is_empty() => Self::Flat(text.clone()),
            _ => Self::Empty,
        }
    }

    /// Fragments in order, one per text-bearing part.
    pub fn into_chunks(self) -> Vec<String> {
        match self {
            Self::Parts(texts) => texts,
            Self::Flat(text) => vec![text],
            Self::Empty => Vec::new(),
        }
    }

    pub fn joined(&self) -> String {
        match self {
            Self::Parts(texts) => texts.concat(),
            Self::Flat(text) => text.clone(),
            Self::Empty => String::new(),
        }
    }
}

/// True when the first candidate stopped for safety-policy reasons.
pub fn is_blocked(response: &GenerateContentResponse) -> bool {
    response
        .candidates
        .first()
        .and_then(|c| c.finish_reason)
        .is_some_and(|reason| reason.code() == SAFETY_FINISH_CODE)
}

/// Why the response was refused, if it was.
///
/// Covers both a safety finish reason and a prompt-level block.
pub fn block_reason(response: &GenerateContentResponse) -> Option<String> {
    if is_blocked(response) {
        return response.candidates.first().and_then(|c| c.finish_reason).map(|r| r.to_string());
    }
    response.prompt_feedback.as_ref().and_then(|f| f.block_reason.clone())
}

/// Has at least one candidate and was not refused.
pub fn validate_response(response: &GenerateContentResponse) -> bool {
    !response.candidates.is_empty() && block_reason(response).is_none()
}

/// Full response text, only when the response passed validation.
pub fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    if !validate_response(response) {
        return None;
    }
    Some(ResponseText::from_response(response).joined())
}
