//! Display formatting for model responses.

use std::sync::LazyLock;

use regex::Regex;

const DEFAULT_CODE_LANGUAGE: &str = "python";

/// Section headers the system prompt asks for, with their icons.
const SECTION_ICONS: &[(&str, &str)] = &[
    ("**Observational Analysis:**", "🔍"),
    ("**General Insights:**", "💡"),
    ("**Recommendations:**", "📋"),
    ("**Cautionary Notes:**", "⚠️"),
    ("**Disclaimer:**", "⚕️"),
];

const CONSULT_PHRASE: &str = "consult a medical professional";
const URGENT_PHRASE: &str = "seek immediate medical attention";
const URGENT_WARNING: &str = "**⚠️ SEEK IMMEDIATE MEDICAL ATTENTION**";

/// Put `prefix` in front of every `needle` not already preceded by it.
fn prefix_each(text: &str, needle: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (pos, _) in text.match_indices(needle) {
        out.push_str(&text[last..pos]);
        if !out.ends_with(prefix) {
            out.push_str(prefix);
        }
        last = pos;
    }
    out.push_str(&text[last..]);
    out
}

/// Wrap every `phrase` in bold unless it already is.
fn bold_each(text: &str, phrase: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (pos, _) in text.match_indices(phrase) {
        let end = pos + phrase.len();
        out.push_str(&text[last..pos]);
        if text[..pos].ends_with("**") && text[end..].starts_with("**") {
            out.push_str(phrase);
        } else {
            out.push_str("**");
            out.push_str(phrase);
            out.push_str("**");
        }
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

/// Add section icons and highlight warnings.
///
/// Idempotent: formatting already-formatted text changes nothing.
pub fn format_medical_response(response: &str) -> String {
    let mut text = response.to_string();
    for (header, icon) in SECTION_ICONS {
        text = prefix_each(&text, header, &format!("{} ", icon));
    }
    text = bold_each(&text, CONSULT_PHRASE);
    text.replace(URGENT_PHRASE, URGENT_WARNING)
}

/// Formats a growing buffer one completed line at a time.
///
/// Lines are formatted once, when their newline arrives. The unfinished tail
/// is shown raw until it completes or [`LineFormatter::finish`] is called.
#[derive(Debug, Default, Clone)]
pub struct LineFormatter {
    /// Bytes of the raw buffer already formatted.
    committed: usize,
    formatted: String,
}

impl LineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatted view of `buffer`, which must extend the previous one.
    pub fn advance(&mut self, buffer: &str) -> String {
        if buffer.len() < self.committed || !buffer.is_char_boundary(self.committed) {
            // Not an extension of what we saw; start over.
            *self = Self::default();
        }

        if let Some(newline) = buffer[self.committed..].rfind('\n') {
            let end = self.committed + newline + 1;
            self.formatted.push_str(&format_medical_response(&buffer[self.committed..end]));
            self.committed = end;
        }

        let mut view = self.formatted.clone();
        view.push_str(&buffer[self.committed..]);
        view
    }

    /// Formatted text of the completed lines so far.
    pub fn committed(&self) -> &str {
        &self.formatted
    }

    /// Formatted view of the final buffer, tail included.
    pub fn finish(mut self, buffer: &str) -> String {
        let mut view = self.advance(buffer);
        let tail_start = self.formatted.len();
        let tail = format_medical_response(&view[tail_start..]);
        view.truncate(tail_start);
        view.push_str(&tail);
        view
    }
}

/// A piece of a response: prose or a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Text(String),
    Code { language: String, content: String },
}

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(\w+)?\n(.*?)```").expect("Code block regex is valid")
});

/// Split fenced code blocks from the prose around them.
///
/// Untagged blocks default to python. Text with no blocks comes back whole.
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut last_end = 0;

    for caps in CODE_BLOCK_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };

        let prose = text[last_end..whole.start()].trim();
        if !prose.is_empty() {
            sections.push(Section::Text(prose.to_string()));
        }

        let language = caps.get(1).map_or(DEFAULT_CODE_LANGUAGE, |m| m.as_str()).to_string();
        let content = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
        sections.push(Section::Code { language, content });
        last_end = whole.end();
    }

    let rest = text[last_end..].trim();
    if !rest.is_empty() {
        sections.push(Section::Text(rest.to_string()));
    }

    if sections.is_empty() {
        sections.push(Section::Text(text.to_string()));
    }
    sections
}
