//! Usage and history ledger: token estimates, cost, titles and the history list.

use std::collections::VecDeque;

use chrono::Local;
use medivision_types::models::language_code;
use medivision_types::{CostRates, HistoryEntry, HistorySummary, InputMode};

/// Characters per estimated token. Not a tokenizer.
pub const CHARS_PER_TOKEN: usize = 4;

const TITLE_MAX_CHARS: usize = 60;
const TITLE_MAX_WORDS: usize = 8;
const TITLE_MAX_KEYWORDS: usize = 2;

/// Scanned in order; the first two distinct hits name the title.
const MEDICAL_KEYWORDS: &[&str] = &[
    "chest", "x-ray", "cough", "fever", "pain", "headache", "rash", "swelling", "fracture",
    "injury", "scan", "mri", "ct", "ultrasound", "heart", "lung", "brain", "knee", "shoulder",
    "back", "abdomen", "diabetes", "infection", "wound", "tumor", "lesion",
];

pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() / CHARS_PER_TOKEN) as u64
}

/// Rate-driven cost in dollars. Zero under the free tier.
pub fn calculate_cost(input_tokens: u64, output_tokens: u64, rates: &CostRates) -> f64 {
    (input_tokens as f64 / 1000.0) * rates.input_per_1k
        + (output_tokens as f64 / 1000.0) * rates.output_per_1k
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
/// `x-ray` becomes `X-Ray`.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn summary_snippet(query: &str) -> String {
    let words: Vec<&str> = query.split_whitespace().collect();
    let mut snippet = words.iter().take(TITLE_MAX_WORDS).copied().collect::<Vec<_>>().join(" ");
    if words.len() > TITLE_MAX_WORDS {
        snippet.push_str("...");
    }
    snippet.chars().take(TITLE_MAX_CHARS).collect()
}

/// Human-readable history title, suffixed with the language code.
///
/// A whitespace-only query counts as empty.
pub fn generate_title(query: &str, input_mode: InputMode, language: &str) -> String {
    let code = language_code(language);

    if query.trim().is_empty() {
        let label = if input_mode.is_image_based() { "Image Analysis" } else { "Medical Analysis" };
        return format!("{} ({})", label, code);
    }

    let lowered = query.to_lowercase();
    let found: Vec<&str> = MEDICAL_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lowered.contains(kw))
        .take(TITLE_MAX_KEYWORDS)
        .collect();

    let title = if found.is_empty() {
        summary_snippet(query)
    } else {
        let names: Vec<String> = found.iter().map(|kw| title_case(kw)).collect();
        format!("{} Assessment", names.join(" & "))
    };

    format!("{} ({})", title, code)
}

/// Most-recent-first list of finished analyses, capped at `capacity`.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Title and record an exchange at the head, evicting the oldest beyond capacity.
    pub fn add(
        &mut self,
        query: &str,
        response: &str,
        input_mode: InputMode,
        language: &str,
        model: &str,
        tokens: u64,
    ) -> &HistoryEntry {
        let entry = HistoryEntry {
            timestamp: Local::now(),
            title: generate_title(query, input_mode, language),
            query: query.to_string(),
            response: response.to_string(),
            input_mode,
            language: language.to_string(),
            model: model.to_string(),
            tokens,
        };
        tracing::debug!("[Ledger] History += '{}' ({} tokens)", entry.title, tokens);

        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// 1-based, newest first.
    pub fn get(&self, number: usize) -> Option<&HistoryEntry> {
        number.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary::from_entries(self.entries.iter())
    }
}
