//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the editor's browser client
//! and the API server.

use revenue_content_core::SeoScore;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Payloads Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Asks the server for the prompt the browser should send to the AI.
#[derive(Deserialize, Debug, ToSchema)]
pub struct BuildPromptRequest {
    pub topic: String,
    pub keyword: String,
    #[serde(default)]
    pub ad_code_top: Option<String>,
    #[serde(default)]
    pub ad_code_bottom: Option<String>,
}

/// Hands the AI's reply back to the server for structuring and scoring.
#[derive(Deserialize, Debug, ToSchema)]
pub struct StructureContentRequest {
    /// A string, an object with a `message` or `content` field, or a list of strings.
    #[schema(value_type = Object)]
    pub ai_content: serde_json::Value,
    pub keyword: String,
    #[serde(default)]
    pub ad_code_top: Option<String>,
    #[serde(default)]
    pub ad_code_bottom: Option<String>,
}

/// Runs the whole pipeline on the server, including the AI call.
#[derive(Deserialize, Debug, ToSchema)]
pub struct GenerateArticleRequest {
    pub topic: String,
    pub keyword: String,
    #[serde(default)]
    pub ad_code_top: Option<String>,
    #[serde(default)]
    pub ad_code_bottom: Option<String>,
    /// Ad codes missing from the request are taken from this document.
    #[serde(default)]
    pub document_id: Option<Uuid>,
}

/// Saves a document's ad codes. Absent fields are left as they are.
#[derive(Deserialize, Debug, ToSchema)]
pub struct SaveAdCodesRequest {
    #[serde(default)]
    pub ad_code_top: Option<String>,
    #[serde(default)]
    pub ad_code_bottom: Option<String>,
    /// Autosaves are acknowledged without writing anything.
    #[serde(default)]
    pub autosave: bool,
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client (Browser)
//=========================================================================================

#[derive(Serialize, Debug, ToSchema)]
pub struct BuildPromptResponse {
    pub prompt: String,
    pub topic: String,
    pub keyword: String,
    pub ad_code_top: Option<String>,
    pub ad_code_bottom: Option<String>,
    /// Always true: the browser is expected to call the AI itself.
    pub use_client_generation: bool,
    pub suggested_title: String,
    /// Non-fatal problems with the submitted ad codes.
    pub warnings: Vec<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ContentResponse {
    /// The article HTML, ready for the editor.
    pub content: String,
    #[schema(value_type = Object)]
    pub seo_score: SeoScore,
    pub seo_summary: String,
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct GenerateArticleResponse {
    pub prompt: String,
    pub suggested_title: String,
    #[serde(flatten)]
    pub result: ContentResponse,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AdCodesResponse {
    pub document_id: Uuid,
    pub ad_code_top: Option<String>,
    pub ad_code_bottom: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CsrfTokenResponse {
    pub token: String,
}
