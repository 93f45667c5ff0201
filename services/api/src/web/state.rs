//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::web::readiness::AiReadiness;
use revenue_content_core::ports::AdCodeStore;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ad_codes: Arc<dyn AdCodeStore>,
    /// Resolved once the AI adapter is up.
    pub ai: AiReadiness,
}
