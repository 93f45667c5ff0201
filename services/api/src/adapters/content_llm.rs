//! services/api/src/adapters/content_llm.rs
//!
//! This module contains the adapter for the article-writing LLM.
//! It implements the `ContentGenerationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use revenue_content_core::{
    domain::{AiSettings, GenerationRequest},
    ports::{ContentGenerationService, PortError, PortResult},
    reply::AiReply,
};
use tracing::debug;

const SYSTEM_INSTRUCTIONS: &str = "You are a professional blog writer. Follow the user's \
    formatting rules exactly: a single `#` title line, `##` markdown subtitles and plain \
    paragraphs. Respond with the article only, without preamble or code fences.";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ContentGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiContentAdapter {
    client: Client<OpenAIConfig>,
}

impl OpenAiContentAdapter {
    /// Creates a new `OpenAiContentAdapter`.
    pub fn new(client: Client<OpenAIConfig>) -> Self {
        Self { client }
    }
}

//=========================================================================================
// `ContentGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentGenerationService for OpenAiContentAdapter {
    async fn generate(
        &self,
        prompt: &str,
        settings: &AiSettings,
        request: &GenerationRequest,
    ) -> PortResult<AiReply> {
        debug!(model = %settings.model, keyword = %request.keyword, "Requesting article");

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&settings.model)
            .messages(messages)
            .max_tokens(settings.max_tokens)
            .temperature(settings.temperature)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unavailable(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                PortError::Unexpected("Article LLM returned no choices in its response.".to_string())
            })?
            .message
            .content
            .ok_or_else(|| {
                PortError::Unexpected("Article LLM response contained no text content.".to_string())
            })?;

        Ok(AiReply::Text(content))
    }
}
