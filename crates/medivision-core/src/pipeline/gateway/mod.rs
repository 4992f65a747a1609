//! Model gateway: provider initialization and invocation.
//!
//! [`ModelGateway`] is the seam between the pipeline and the provider.
//! [`GeminiClient`] is the HTTP implementation; tests script their own.

mod client;
mod response;
mod sse;

pub use client::GeminiClient;
pub use response::{block_reason, extract_text, is_blocked, validate_response, ResponseText};
pub use sse::parse_sse_stream;

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use medivision_types::models::{find_model, ModelSpec};
use medivision_types::protocol::{GenerateContentResponse, GenerationConfig, SafetySetting};
use medivision_types::{AppConfig, GatewayError};

use crate::pipeline::prompt::PromptPart;
use crate::security::validate_api_key;

/// Provider responses in arrival order. Finite and not restartable.
pub type ResponseStream =
    Pin<Box<dyn Stream<Item = Result<GenerateContentResponse, GatewayError>> + Send>>;

/// Text fragments in arrival order. An `Err` item is terminal.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, GatewayError>> + Send>>;

/// A model bound to a key and generation parameters, ready to submit to.
#[derive(Clone)]
pub struct GenerativeModel {
    pub spec: &'static ModelSpec,
    api_key: String,
    pub generation: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerativeModel {
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for GenerativeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeModel")
            .field("model", &self.spec.id)
            .field("api_key", &"<redacted>")
            .field("generation", &self.generation)
            .finish()
    }
}

/// Validate the key format and resolve the model against the catalog.
pub fn initialize(
    api_key: &str,
    model: &str,
    config: &AppConfig,
) -> Result<GenerativeModel, GatewayError> {
    let api_key = api_key.trim();
    if !validate_api_key(api_key) {
        return Err(GatewayError::InvalidApiKey);
    }

    let spec = find_model(model).ok_or_else(|| GatewayError::UnknownModel {
        model: model.to_string(),
    })?;

    tracing::debug!("[Gateway] Initialized {} ({})", spec.display_name, spec.id);

    Ok(GenerativeModel {
        spec,
        api_key: api_key.to_string(),
        generation: config.generation.to_wire(spec.max_tokens),
        safety_settings: config.safety_settings(),
    })
}

/// Submit prompt parts to a generative model.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Open a streamed generation.
    async fn submit(
        &self,
        model: &GenerativeModel,
        parts: Vec<PromptPart>,
    ) -> Result<ResponseStream, GatewayError>;

    /// Generate the whole response in one call.
    async fn generate(
        &self,
        model: &GenerativeModel,
        parts: Vec<PromptPart>,
    ) -> Result<GenerateContentResponse, GatewayError>;
}

/// Reduce provider responses to text fragments.
///
/// A safety block or provider error becomes a terminal `Err` item; fragments
/// already yielded stay with the consumer.
pub fn text_chunks(mut responses: ResponseStream) -> ChunkStream {
    Box::pin(async_stream::stream! {
        while let Some(item) = responses.next().await {
            match item {
                Ok(response) => {
                    // A blocked event contributes no text, whatever it carries.
                    if let Some(reason) = block_reason(&response) {
                        tracing::warn!("[Gateway] Response blocked: {}", reason);
                        yield Err(GatewayError::SafetyBlocked { reason });
                        break;
                    }
                    for text in ResponseText::from_response(&response).into_chunks() {
                        yield Ok(text);
                    }
                },
                Err(e) => {
                    tracing::error!("[Gateway] Stream failed: {}", e);
                    yield Err(e);
                    break;
                },
            }
        }
    })
}
