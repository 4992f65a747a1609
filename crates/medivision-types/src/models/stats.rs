//! Usage and feedback counters.

use serde::{Deserialize, Serialize};

/// Cumulative token and cost estimates for one session.
///
/// Only grows; cleared by an explicit session reset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct UsageStats {
    pub total_tokens: u64,
    /// Estimated cost in USD
    pub total_cost: f64,
}

impl UsageStats {
    pub fn record(&mut self, tokens: u64, cost: f64) {
        self.total_tokens = self.total_tokens.saturating_add(tokens);
        if cost.is_finite() && cost > 0.0 {
            self.total_cost += cost;
        }
    }

    /// (`"12.3K"`, `"$0.0000"`)
    pub fn display(&self) -> (String, String) {
        (format_token_count(self.total_tokens), format_cost(self.total_cost))
    }
}

/// Thumbs up / thumbs down counts. Never decremented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FeedbackStats {
    pub positive: u64,
    pub negative: u64,
}

impl FeedbackStats {
    pub fn record(&mut self, positive: bool) {
        if positive {
            self.positive = self.positive.saturating_add(1);
        } else {
            self.negative = self.negative.saturating_add(1);
        }
    }

    pub fn total(&self) -> u64 {
        self.positive.saturating_add(self.negative)
    }
}

/// Format a token count with K/M suffix.
#[allow(
    clippy::cast_precision_loss,
    clippy::as_conversions,
    reason = "intentional precision loss for human-readable statistics display"
)]
pub fn format_token_count(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{:.2}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}K", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}

/// Format a USD amount; sub-cent values keep four decimals.
pub fn format_cost(cost: f64) -> String {
    if cost < 0.01 {
        format!("${:.4}", cost)
    } else {
        format!("${:.2}", cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_is_monotonic() {
        let mut usage = UsageStats::default();
        usage.record(120, 0.0);
        usage.record(30, 0.5);
        usage.record(0, -1.0);

        assert_eq!(usage.total_tokens, 150);
        assert!((usage.total_cost - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_feedback_counts() {
        let mut feedback = FeedbackStats::default();
        feedback.record(true);
        feedback.record(true);
        feedback.record(false);

        assert_eq!(feedback.positive, 2);
        assert_eq!(feedback.negative, 1);
        assert_eq!(feedback.total(), 3);
    }

    #[test]
    fn test_format_token_count() {
        assert_eq!(format_token_count(999), "999");
        assert_eq!(format_token_count(1_500), "1.5K");
        assert_eq!(format_token_count(2_345_678), "2.35M");
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(0.0), "$0.0000");
        assert_eq!(format_cost(0.004), "$0.0040");
        assert_eq!(format_cost(1.5), "$1.50");
    }
}
