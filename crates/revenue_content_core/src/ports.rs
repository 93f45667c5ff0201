//! crates/revenue_content_core/src/ports.rs
//!
//! Defines the service contracts (traits) the pipeline depends on.
//! The AI model and the host CMS's document store live behind these traits,
//! keeping the structurer and the scorer free of I/O.

use crate::domain::{AdSlots, AiSettings, GenerationRequest};
use crate::reply::AiReply;
use async_trait::async_trait;
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The remote service could not be reached or refused the call.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ContentGenerationService: Send + Sync {
    /// Sends the built prompt to the model and returns its reply untouched.
    ///
    /// `request` is passed along for adapters that do not talk to a model at all.
    async fn generate(
        &self,
        prompt: &str,
        settings: &AiSettings,
        request: &GenerationRequest,
    ) -> PortResult<AiReply>;
}

/// A partial update of a document's ad codes. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdCodeUpdate {
    pub top: Option<String>,
    pub bottom: Option<String>,
}

#[async_trait]
pub trait AdCodeStore: Send + Sync {
    /// Loads the ad codes saved against a document. Unknown documents have none.
    async fn load_ad_codes(&self, document_id: Uuid) -> PortResult<AdSlots>;

    /// Applies `update` and returns the codes as stored afterwards.
    async fn save_ad_codes(&self, document_id: Uuid, update: &AdCodeUpdate) -> PortResult<AdSlots>;
}
