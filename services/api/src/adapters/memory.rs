//! services/api/src/adapters/memory.rs
//!
//! In-process `AdCodeStore`, used when no database is configured and in tests.

use async_trait::async_trait;
use revenue_content_core::domain::{normalize_ad_code, AdSlots};
use revenue_content_core::ports::{AdCodeStore, AdCodeUpdate, PortResult};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryAdCodeStore {
    documents: RwLock<HashMap<Uuid, AdSlots>>,
}

impl MemoryAdCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdCodeStore for MemoryAdCodeStore {
    async fn load_ad_codes(&self, document_id: Uuid) -> PortResult<AdSlots> {
        Ok(self
            .documents
            .read()
            .await
            .get(&document_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_ad_codes(&self, document_id: Uuid, update: &AdCodeUpdate) -> PortResult<AdSlots> {
        let mut documents = self.documents.write().await;
        let slots = documents.entry(document_id).or_default();
        if update.top.is_some() {
            slots.top = normalize_ad_code(update.top.clone());
        }
        if update.bottom.is_some() {
            slots.bottom = normalize_ad_code(update.bottom.clone());
        }
        Ok(slots.clone())
    }
}
