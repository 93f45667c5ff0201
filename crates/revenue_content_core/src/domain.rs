//! crates/revenue_content_core/src/domain.rs
//!
//! Defines the core data structures for the content pipeline: the editor's
//! generation request, the structured article recovered from the AI's text,
//! the rendered HTML and the SEO score computed over it.

use crate::html::strip_tags;
use serde::{Deserialize, Serialize};
use std::fmt;

//=========================================================================================
// Request Types
//=========================================================================================

/// A rejected generation request. Checked before any prompt is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("A topic is required")]
    MissingTopic,
    #[error("A target keyword is required")]
    MissingKeyword,
}

/// The two advertisement snippets placed around the middle section.
///
/// Empty or whitespace-only codes are stored as `None`, so "present" always
/// means "has something to render".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSlots {
    pub top: Option<String>,
    pub bottom: Option<String>,
}

impl AdSlots {
    pub fn new(top: Option<String>, bottom: Option<String>) -> Self {
        Self {
            top: normalize_ad_code(top),
            bottom: normalize_ad_code(bottom),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none()
    }
}

/// Trims an ad code and drops it when nothing is left.
pub fn normalize_ad_code(code: Option<String>) -> Option<String> {
    code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())
}

/// Returns true when an ad code looks like an HTML snippet.
///
/// Editors occasionally paste a bare publisher id instead of the embed code;
/// this only catches that case and is not a validator.
pub fn looks_like_html(code: &str) -> bool {
    code.contains('<') && code.contains('>')
}

/// One editor action: write an article about `topic` targeting `keyword`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub keyword: String,
    pub ads: AdSlots,
}

impl GenerationRequest {
    /// Builds a request, rejecting an empty topic or keyword.
    ///
    /// Both are reduced to plain text first: tags are stripped and runs of
    /// whitespace collapse to one space.
    pub fn new(topic: &str, keyword: &str, ads: AdSlots) -> Result<Self, ValidationError> {
        let topic = strip_tags(topic);
        let keyword = strip_tags(keyword);

        if topic.is_empty() {
            return Err(ValidationError::MissingTopic);
        }
        if keyword.is_empty() {
            return Err(ValidationError::MissingKeyword);
        }

        Ok(Self {
            topic,
            keyword,
            ads,
        })
    }
}

/// Fixed settings sent along with every prompt to the AI collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 3000,
        }
    }
}

//=========================================================================================
// Structured Content
//=========================================================================================

/// A subtitle and the text beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub subtitle: String,
    pub body: String,
}

/// The AI's free text, sliced into a title, an optional intro and at most
/// three sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredArticle {
    pub title: String,
    pub intro: Option<String>,
    pub sections: Vec<Section>,
}

/// The final HTML handed to the editor, with the article it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub article: StructuredArticle,
    pub html: String,
}

//=========================================================================================
// SEO Score
//=========================================================================================

/// Letter grade derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven checks of the rubric, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    KeywordDensity,
    SubtitleCount,
    ContentLength,
    AdPlacement,
    CtaPresence,
    StructuredData,
    ExternalLink,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::KeywordDensity,
        Criterion::SubtitleCount,
        Criterion::ContentLength,
        Criterion::AdPlacement,
        Criterion::CtaPresence,
        Criterion::StructuredData,
        Criterion::ExternalLink,
    ];

    pub fn max_points(&self) -> u8 {
        match self {
            Criterion::KeywordDensity | Criterion::SubtitleCount => 20,
            Criterion::ContentLength | Criterion::AdPlacement => 15,
            Criterion::CtaPresence | Criterion::StructuredData | Criterion::ExternalLink => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Success,
    Warning,
    Failure,
}

impl CheckStatus {
    fn icon(&self) -> &'static str {
        match self {
            CheckStatus::Success => "✅",
            CheckStatus::Warning => "⚠️",
            CheckStatus::Failure => "❌",
        }
    }
}

/// The outcome of one rubric check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDetail {
    pub criterion: Criterion,
    pub status: CheckStatus,
    pub points: u8,
    pub max_points: u8,
    pub message: String,
}

impl fmt::Display for CheckDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.icon(), self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoScore {
    pub score: u8,
    pub grade: Grade,
    pub details: Vec<CheckDetail>,
}

impl SeoScore {
    /// A one-line verdict for the editor, keyed off the total score.
    pub fn summary(&self) -> &'static str {
        match self.score {
            90.. => "Excellent SEO score: ready to rank.",
            80..=89 => "Good SEO score: a few tweaks will make it perfect.",
            _ => "SEO needs improvement.",
        }
    }
}
