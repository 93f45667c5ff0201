//! crates/revenue_content_core/src/reply.rs
//!
//! Recovers the generated text from whatever shape the AI client hands back.

use serde::Deserialize;

/// Replies shorter than this many characters are treated as a failed generation.
pub const MIN_GENERATED_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("The AI reply did not contain any recognizable text")]
    UnrecognizedReply,
    #[error("The AI did not generate enough content ({0} characters)")]
    InsufficientContent(usize),
}

/// The shapes an AI chat client is known to reply with.
///
/// Variants are tried top to bottom when deserializing, which gives the
/// extraction order: plain string, `message` field, `content` field, list of
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AiReply {
    Text(String),
    Message { message: Box<AiReply> },
    Content { content: String },
    Parts(Vec<String>),
}

impl AiReply {
    /// Parses an arbitrary JSON value, returning `None` for unknown shapes.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    pub fn text(&self) -> String {
        match self {
            AiReply::Text(text) => text.clone(),
            AiReply::Message { message } => message.text(),
            AiReply::Content { content } => content.clone(),
            AiReply::Parts(parts) => parts.join("\n"),
        }
    }
}

impl From<String> for AiReply {
    fn from(text: String) -> Self {
        AiReply::Text(text)
    }
}

/// Extracts the generated text and rejects replies that are too short to structure.
pub fn extract_generated_text(reply: &AiReply) -> Result<String, GenerationError> {
    let text = reply.text();
    let length = text.trim().chars().count();
    if length < MIN_GENERATED_CHARS {
        return Err(GenerationError::InsufficientContent(length));
    }
    Ok(text)
}
