//! services/api/src/web/readiness.rs
//!
//! A one-shot readiness cell for the AI service. Startup resolves it once
//! the adapter is built; handlers await it instead of polling for a client.

use revenue_content_core::ports::ContentGenerationService;
use std::sync::Arc;
use tokio::sync::watch;

type Service = Arc<dyn ContentGenerationService>;

#[derive(Clone)]
pub struct AiReadiness {
    slot: Arc<watch::Sender<Option<Service>>>,
}

impl Default for AiReadiness {
    fn default() -> Self {
        Self::new()
    }
}

impl AiReadiness {
    /// Creates an unresolved cell.
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
        }
    }

    /// Creates a cell that is already resolved.
    pub fn ready(service: Service) -> Self {
        let readiness = Self::new();
        readiness.resolve(service);
        readiness
    }

    /// Publishes the service. Only the first call has any effect; returns
    /// whether this call was it.
    pub fn resolve(&self, service: Service) -> bool {
        self.slot.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(service);
            true
        })
    }

    /// Waits until the service is available.
    pub async fn wait(&self) -> Option<Service> {
        let mut receiver = self.slot.subscribe();
        let slot = receiver.wait_for(Option::is_some).await.ok()?;
        (*slot).clone()
    }
}
