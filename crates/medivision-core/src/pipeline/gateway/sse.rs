//! Server-sent-event framing for `streamGenerateContent?alt=sse`.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use medivision_types::protocol::GenerateContentResponse;
use medivision_types::GatewayError;
use serde_json::Value;
use tracing::{debug, error};

use super::ResponseStream;

const MAX_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Parse a single SSE line into (key, value) pair.
///
/// SSE format: `key: value\n`
pub(crate) fn parse_sse_line(line: &str) -> Option<(&str, &str)> {
    let colon_pos = line.find(':')?;
    let key = &line[..colon_pos];
    let value = line[colon_pos + 1..].trim_start();
    Some((key, value))
}

/// Decode one `data:` payload. `Ok(None)` for keep-alive payloads.
fn decode_event(data: &str) -> Result<Option<GenerateContentResponse>, GatewayError> {
    let data = data.trim();
    if data.is_empty() || data == "[DONE]" {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(data)
        .map_err(|e| GatewayError::Decode { message: format!("JSON parse error: {}", e) })?;

    // Errors raised after the stream opened arrive as an event body.
    if let Some(err) = value.get("error") {
        let status = err.get("code").and_then(Value::as_u64).unwrap_or(500);
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown provider error")
            .to_string();
        return Err(GatewayError::Upstream { status: status as u16, message });
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| GatewayError::Decode { message: e.to_string() })
}

/// Process one complete line. `Some` when it produced an item for the consumer.
fn handle_line(raw: &[u8]) -> Option<Result<GenerateContentResponse, GatewayError>> {
    let Ok(line) = std::str::from_utf8(raw) else {
        return Some(Err(GatewayError::Decode { message: "Invalid UTF-8 in event stream".to_string() }));
    };
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return None;
    }

    match parse_sse_line(line) {
        Some(("data", payload)) => decode_event(payload).transpose(),
        Some((key, _)) => {
            debug!("[Gateway-SSE] Ignoring '{}' field", key);
            None
        },
        None => None,
    }
}

/// Turn a raw byte stream into provider responses.
///
/// Transport errors and malformed events end the stream with an `Err` item.
/// Transport errors are converted with `Into`, so callers choose how a
/// timeout or reset is classified.
pub fn parse_sse_stream<S, E>(byte_stream: S) -> ResponseStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<GatewayError> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_stream = Box::pin(byte_stream);
        let mut buffer = BytesMut::new();

        'outer: loop {
            let bytes = match byte_stream.next().await {
                Some(Ok(b)) => b,
                Some(Err(e)) => {
                    let e: GatewayError = e.into();
                    error!("[Gateway-SSE] {}", e);
                    yield Err(e);
                    break;
                },
                None => break,
            };

            buffer.extend_from_slice(&bytes);
            if buffer.len() > MAX_BUFFER_SIZE {
                error!("[Gateway-SSE] Buffer overflow, dropping connection");
                yield Err(GatewayError::Stream { message: "Event buffer overflow".to_string() });
                break;
            }

            while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
                let line = buffer.split_to(pos + 1);
                if let Some(item) = handle_line(&line) {
                    let failed = item.is_err();
                    yield item;
                    if failed {
                        break 'outer;
                    }
                }
            }
        }

        // Final event without a trailing newline.
        if !buffer.is_empty() {
            if let Some(item) = handle_line(&buffer) {
                yield item;
            }
        }
    })
}
