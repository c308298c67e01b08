//! Narrative generation.
//!
//! [`NarrativeGenerator`] is the seam to the external text model; the
//! production implementation is [`BedrockNarrator`], which makes exactly one
//! Converse call per request. [`NarrativeClient`] wraps a generator and never
//! fails: any error becomes a clearly marked fallback narrative so the
//! document can always be rendered.

use std::fmt;
use std::future::Future;

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, StopReason,
    SystemContentBlock,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::BedrockError;
use crate::prompt::SYSTEM_PROMPT;

/// Default Bedrock inference profile for narrative generation.
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-3-5-haiku-20241022-v1:0";

/// Sampling temperature for every request.
pub const TEMPERATURE: f32 = 0.6;

/// Upper bound on generated tokens. Generous for a 600-800 character
/// Japanese narrative.
pub const MAX_OUTPUT_TOKENS: i32 = 2000;

/// First line of every fallback narrative. Also what callers and tests look
/// for to detect a failed generation in rendered output.
pub const FALLBACK_MARKER: &str = "※AIコメントの生成中にエラーが発生しました。";

/// A text model that turns an instruction prompt into narrative text.
pub trait NarrativeGenerator: Send + Sync {
    /// Make a single generation attempt. Implementations must not retry.
    fn generate(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, BedrockError>> + Send;
}

/// Generates narratives through the Bedrock Converse API.
#[derive(Clone)]
pub struct BedrockNarrator {
    client: Client,
    model_id: String,
}

impl BedrockNarrator {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self::from_client(Client::new(config), model_id)
    }

    pub fn from_client(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl NarrativeGenerator for BedrockNarrator {
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String, BedrockError> {
        let request_id = Uuid::new_v4();
        info!(request_id = %request_id, model = %self.model_id, "starting narrative generation");

        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt.to_string()))
            .build()
            .map_err(|e| BedrockError::Invocation(e.to_string()))?;

        let inference = InferenceConfiguration::builder()
            .temperature(TEMPERATURE)
            .max_tokens(MAX_OUTPUT_TOKENS)
            .build();

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(message)
            .inference_config(inference)
            .send()
            .await
            .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

        if *response.stop_reason() == StopReason::MaxTokens {
            warn!(request_id = %request_id, "narrative truncated at max tokens");
        }

        if let Some(usage) = response.usage() {
            info!(
                request_id = %request_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "narrative token usage"
            );
        }

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        let text = text.trim();
        if text.is_empty() {
            return Err(BedrockError::EmptyResponse);
        }

        info!(request_id = %request_id, text_len = text.len(), "narrative generation complete");
        Ok(text.to_string())
    }
}

/// Whether a narrative came from the model or is the fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NarrativeStatus {
    Generated,
    Fallback { reason: String },
}

/// Narrative text for one diagnosis run, tagged with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub text: String,
    pub status: NarrativeStatus,
}

impl Narrative {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: NarrativeStatus::Generated,
        }
    }

    /// Fallback narrative embedding a readable description of `cause`.
    pub fn fallback(cause: &dyn fmt::Display) -> Self {
        let reason = cause.to_string();
        Self {
            text: fallback_text(&reason),
            status: NarrativeStatus::Fallback { reason },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.status, NarrativeStatus::Fallback { .. })
    }
}

/// The fixed fallback message for a failed generation.
pub fn fallback_text(reason: &str) -> String {
    format!(
        "{FALLBACK_MARKER}APIキーやネットワーク設定をご確認ください。\n\nエラー内容：{reason}"
    )
}

/// Infallible front for a [`NarrativeGenerator`].
pub struct NarrativeClient<G> {
    generator: G,
}

impl<G: NarrativeGenerator> NarrativeClient<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate a narrative for `prompt`, substituting the fallback text on
    /// any failure. One attempt; nothing is cached.
    pub async fn generate(&self, prompt: &str) -> Narrative {
        match self.generator.generate(SYSTEM_PROMPT, prompt).await {
            Ok(text) => Narrative::generated(text),
            Err(e) => {
                warn!(error = %e, "narrative generation failed, using fallback text");
                Narrative::fallback(&e)
            }
        }
    }
}
