//! HTTP implementation of [`ModelGateway`] against the Generative Language API.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use futures::StreamExt;
use medivision_types::protocol::{
    Content, GeminiInlineData, GeminiPart, GeminiRole, GenerateContentRequest,
    GenerateContentResponse,
};
use medivision_types::{AppConfig, GatewayError};
use reqwest::{header, Client, Response};
use serde_json::Value;

use super::sse::parse_sse_stream;
use super::{GenerativeModel, ModelGateway, ResponseStream};
use crate::pipeline::prompt::PromptPart;

const API_KEY_HEADER: &str = "x-goog-api-key";
const MIN_TIMEOUT_SECS: u64 = 5;

pub fn build_url(base_url: &str, model_id: &str, method: &str, query_string: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    match query_string {
        Some(qs) => format!("{}/models/{}:{}?{}", base, model_id, method, qs),
        None => format!("{}/models/{}:{}", base, model_id, method),
    }
}

/// Map assembled prompt parts onto a single user turn.
pub(crate) fn build_request(model: &GenerativeModel, parts: Vec<PromptPart>) -> GenerateContentRequest {
    let parts = parts
        .into_iter()
        .map(|part| match part {
            PromptPart::Image { mime_type, bytes } => GeminiPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type,
                    data: base64::engine::general_purpose::STANDARD.encode(bytes),
                },
            },
            PromptPart::Text(text) => GeminiPart::Text { text },
        })
        .collect();

    GenerateContentRequest {
        contents: vec![Content { role: Some(GeminiRole::User), parts }],
        generation_config: Some(model.generation.clone()),
        safety_settings: model.safety_settings.clone(),
    }
}

fn map_send_error(e: reqwest::Error, timeout_secs: u64) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout { duration_secs: timeout_secs }
    } else {
        GatewayError::Transport { message: e.to_string() }
    }
}

/// Body errors after the stream opened. A stalled read is still a timeout.
fn map_stream_error(e: reqwest::Error, timeout_secs: u64) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout { duration_secs: timeout_secs }
    } else {
        GatewayError::Stream { message: e.to_string() }
    }
}

/// Pull `error.message` out of a provider error body, falling back to the raw text.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

pub struct GeminiClient {
    http: Client,
    base_url: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        let timeout_secs = config.request_timeout_secs.max(MIN_TIMEOUT_SECS);
        // Streams may run longer than the timeout as long as bytes keep
        // arriving; whole-request deadlines are set per call in `generate`.
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(timeout_secs))
            .read_timeout(Duration::from_secs(timeout_secs))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| GatewayError::InitializationFailed {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, base_url: config.api_base_url.trim_end_matches('/').to_string(), timeout_secs })
    }

    /// Point the client at another endpoint (mock servers, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(
        &self,
        model: &GenerativeModel,
        method: &str,
        query_string: Option<&str>,
        body: &GenerateContentRequest,
        deadline: Option<Duration>,
    ) -> Result<Response, GatewayError> {
        let url = build_url(&self.base_url, model.spec.id, method, query_string);
        let key = header::HeaderValue::from_str(model.api_key())
            .map_err(|_| GatewayError::InvalidApiKey)?;

        tracing::debug!("[Gateway] POST {} ({})", url, model.spec.display_name);

        let mut request = self.http.post(&url).header(API_KEY_HEADER, key).json(body);
        if let Some(deadline) = deadline {
            request = request.timeout(deadline);
        }

        let response = request
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout_secs))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = upstream_message(&text);
        tracing::error!("[Gateway] Upstream returned {}: {}", status.as_u16(), message);

        // The key format passed locally but the provider rejected it.
        if status.as_u16() == 400 && message.contains("API key not valid") {
            return Err(GatewayError::InvalidApiKey);
        }
        Err(GatewayError::Upstream { status: status.as_u16(), message })
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn submit(
        &self,
        model: &GenerativeModel,
        parts: Vec<PromptPart>,
    ) -> Result<ResponseStream, GatewayError> {
        let body = build_request(model, parts);
        let response = self.post(model, "streamGenerateContent", Some("alt=sse"), &body, None).await?;
        let timeout_secs = self.timeout_secs;
        Ok(parse_sse_stream(
            response.bytes_stream().map(move |chunk| chunk.map_err(|e| map_stream_error(e, timeout_secs))),
        ))
    }

    async fn generate(
        &self,
        model: &GenerativeModel,
        parts: Vec<PromptPart>,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let body = build_request(model, parts);
        let deadline = Duration::from_secs(self.timeout_secs);
        let response = self.post(model, "generateContent", None, &body, Some(deadline)).await?;
        response.json::<GenerateContentResponse>().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout { duration_secs: self.timeout_secs }
            } else {
                GatewayError::Decode { message: e.to_string() }
            }
        })
    }
}
