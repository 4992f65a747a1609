//! Streaming accumulator: folds text fragments into a growing response.

use futures::{Stream, StreamExt};
use medivision_types::GatewayError;

/// Marker appended to the partial text when the stream breaks off.
pub const STREAM_ERROR_MARKER: &str = "\n\n⚠️ Error during streaming: ";
/// Marker appended when the provider refuses to continue.
pub const SAFETY_BLOCK_MARKER: &str =
    "\n\n⚠️ Response blocked by safety filters. Please rephrase your query.";

/// How the stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    Completed,
    Blocked { reason: String },
    Failed { error: GatewayError },
}

impl StreamOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Result of draining a chunk stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulated {
    /// Concatenated fragments, plus an inline marker when the stream did not complete.
    pub text: String,
    /// Fragments received before the stream ended.
    pub chunks: usize,
    pub outcome: StreamOutcome,
}

impl Accumulated {
    /// Text received from the provider, without any inline marker.
    pub fn received_text(&self) -> &str {
        match &self.outcome {
            StreamOutcome::Completed => &self.text,
            StreamOutcome::Blocked { .. } | StreamOutcome::Failed { .. } => {
                self.text.rfind("\n\n⚠️").map_or(self.text.as_str(), |pos| &self.text[..pos])
            },
        }
    }
}

/// Drain `stream`, calling `on_update` with the full text after every fragment.
///
/// The callback always sees a prefix of the final text. On an error item the
/// marker is appended, `on_update` fires once more, and draining stops.
pub async fn accumulate<S, F>(mut stream: S, mut on_update: F) -> Accumulated
where
    S: Stream<Item = Result<String, GatewayError>> + Unpin,
    F: FnMut(&str),
{
    let mut text = String::new();
    let mut chunks = 0usize;

    while let Some(item) = stream.next().await {
        match item {
            Ok(fragment) => {
                text.push_str(&fragment);
                chunks += 1;
                on_update(&text);
            },
            Err(GatewayError::SafetyBlocked { reason }) => {
                text.push_str(SAFETY_BLOCK_MARKER);
                on_update(&text);
                return Accumulated { text, chunks, outcome: StreamOutcome::Blocked { reason } };
            },
            Err(error) => {
                tracing::warn!("[Accumulator] Stream ended after {} chunks: {}", chunks, error);
                text.push_str(STREAM_ERROR_MARKER);
                text.push_str(&error.to_string());
                on_update(&text);
                return Accumulated { text, chunks, outcome: StreamOutcome::Failed { error } };
            },
        }
    }

    Accumulated { text, chunks, outcome: StreamOutcome::Completed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(items: Vec<Result<&'static str, GatewayError>>) -> impl Stream<Item = Result<String, GatewayError>> + Unpin {
        futures::stream::iter(items.into_iter().map(|i| i.map(str::to_string)))
    }

    #[tokio::test]
    async fn test_each_fragment_triggers_update() {
        let mut seen = Vec::new();
        let result = accumulate(chunks(vec![Ok("A"), Ok("B"), Ok("C")]), |t| seen.push(t.to_string())).await;

        assert_eq!(seen, vec!["A", "AB", "ABC"]);
        assert_eq!(result.text, "ABC");
        assert_eq!(result.chunks, 3);
        assert!(result.outcome.is_completed());
        assert_eq!(result.received_text(), "ABC");
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let mut calls = 0;
        let result = accumulate(chunks(vec![]), |_| calls += 1).await;
        assert_eq!(calls, 0);
        assert_eq!(result.text, "");
        assert!(result.outcome.is_completed());
    }

    #[tokio::test]
    async fn test_error_keeps_partial_text_and_appends_marker() {
        let mut seen = Vec::new();
        let error = GatewayError::Stream { message: "connection reset".to_string() };
        let result = accumulate(
            chunks(vec![Ok("Partial"), Err(error.clone()), Ok("ignored")]),
            |t| seen.push(t.to_string()),
        )
        .await;

        assert_eq!(seen.len(), 2);
        assert!(seen[1].starts_with("Partial\n\n⚠️ Error during streaming: "));
        assert_eq!(result.outcome, StreamOutcome::Failed { error });
        assert_eq!(result.received_text(), "Partial");
        assert_eq!(result.chunks, 1);
    }

    #[tokio::test]
    async fn test_block_outcome() {
        let result = accumulate(
            chunks(vec![Ok("x"), Err(GatewayError::SafetyBlocked { reason: "SAFETY".to_string() })]),
            |_| {},
        )
        .await;
        assert_eq!(result.outcome, StreamOutcome::Blocked { reason: "SAFETY".to_string() });
        assert!(result.text.ends_with(SAFETY_BLOCK_MARKER));
        assert_eq!(result.received_text(), "x");
    }

    #[tokio::test]
    async fn test_every_update_is_prefix_of_final() {
        let mut seen = Vec::new();
        let result = accumulate(chunks(vec![Ok("Hello"), Ok(", "), Ok("world")]), |t| seen.push(t.to_string())).await;
        assert!(seen.iter().all(|s| result.text.starts_with(s.as_str())));
    }
}
