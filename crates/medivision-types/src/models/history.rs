//! Completed query/response exchanges.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::config::InputMode;

/// Record of one finished analysis. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    /// Human-readable title derived from the query
    pub title: String,
    pub query: String,
    pub response: String,
    pub input_mode: InputMode,
    pub language: String,
    /// Model display name
    pub model: String,
    /// Estimated input + output tokens
    pub tokens: u64,
}

impl HistoryEntry {
    /// `2025-01-31 14:05:09`
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Aggregate figures over a history list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HistorySummary {
    pub total_analyses: usize,
    pub total_tokens: u64,
    pub languages_used: usize,
    pub models_used: usize,
}

impl HistorySummary {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> Self {
        let mut summary = Self::default();
        let mut languages = BTreeSet::new();
        let mut models = BTreeSet::new();

        for entry in entries {
            summary.total_analyses += 1;
            summary.total_tokens = summary.total_tokens.saturating_add(entry.tokens);
            languages.insert(entry.language.as_str());
            models.insert(entry.model.as_str());
        }

        summary.languages_used = languages.len();
        summary.models_used = models.len();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(language: &str, model: &str, tokens: u64) -> HistoryEntry {
        HistoryEntry {
            timestamp: Local::now(),
            title: "t".to_string(),
            query: "q".to_string(),
            response: "r".to_string(),
            input_mode: InputMode::TextOnly,
            language: language.to_string(),
            model: model.to_string(),
            tokens,
        }
    }

    #[test]
    fn test_summary_counts_distinct_values() {
        let entries = vec![
            entry("English", "Gemini 2.5 Flash", 100),
            entry("French", "Gemini 2.5 Flash", 50),
            entry("English", "Gemini 2.5 Pro", 25),
        ];

        let summary = HistorySummary::from_entries(&entries);
        assert_eq!(summary.total_analyses, 3);
        assert_eq!(summary.total_tokens, 175);
        assert_eq!(summary.languages_used, 2);
        assert_eq!(summary.models_used, 2);
    }

    #[test]
    fn test_summary_of_empty_history() {
        assert_eq!(HistorySummary::from_entries(&Vec::<HistoryEntry>::new()), HistorySummary::default());
    }
}
