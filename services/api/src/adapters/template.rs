//! services/api/src/adapters/template.rs
//!
//! An offline stand-in for the article LLM. It ignores the prompt and
//! returns the fixed fallback draft for the request's topic and keyword,
//! so the pipeline stays usable without AI credentials.

use async_trait::async_trait;
use revenue_content_core::{
    domain::{AiSettings, GenerationRequest},
    ports::{ContentGenerationService, PortResult},
    prompt::fallback_draft,
    reply::AiReply,
};

#[derive(Clone, Debug, Default)]
pub struct TemplateContentAdapter;

#[async_trait]
impl ContentGenerationService for TemplateContentAdapter {
    async fn generate(
        &self,
        _prompt: &str,
        _settings: &AiSettings,
        request: &GenerationRequest,
    ) -> PortResult<AiReply> {
        Ok(AiReply::Text(fallback_draft(&request.topic, &request.keyword)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revenue_content_core::{domain::AdSlots, reply::extract_generated_text};

    #[tokio::test]
    async fn draft_is_long_enough_to_structure() {
        let request = GenerationRequest::new("다이어트 방법", "다이어트", AdSlots::default()).unwrap();
        let reply = TemplateContentAdapter
            .generate("ignored", &AiSettings::default(), &request)
            .await
            .unwrap();

        let text = extract_generated_text(&reply).unwrap();
        assert!(text.contains("## 다이어트의 핵심 포인트"));
    }
}
