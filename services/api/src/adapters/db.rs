//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `AdCodeStore` port from the `core` crate. It keeps the two ad codes of
//! each document in PostgreSQL using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use revenue_content_core::domain::AdSlots;
use revenue_content_core::ports::{AdCodeStore, AdCodeUpdate, PortError, PortResult};
use sqlx::{migrate::MigrateError, FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `AdCodeStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct AdCodeRecord {
    ad_code_top: Option<String>,
    ad_code_bottom: Option<String>,
    updated_at: DateTime<Utc>,
}
impl AdCodeRecord {
    fn to_domain(self) -> AdSlots {
        AdSlots::new(self.ad_code_top, self.ad_code_bottom)
    }
}

//=========================================================================================
// `AdCodeStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl AdCodeStore for DbAdapter {
    async fn load_ad_codes(&self, document_id: Uuid) -> PortResult<AdSlots> {
        let record = sqlx::query_as::<_, AdCodeRecord>(
            "SELECT ad_code_top, ad_code_bottom, updated_at
             FROM document_ad_codes WHERE document_id = $1",
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.map(AdCodeRecord::to_domain).unwrap_or_default())
    }

    async fn save_ad_codes(&self, document_id: Uuid, update: &AdCodeUpdate) -> PortResult<AdSlots> {
        // A NULL parameter leaves the stored column untouched; an empty
        // string clears it.
        let record = sqlx::query_as::<_, AdCodeRecord>(
            "INSERT INTO document_ad_codes (document_id, ad_code_top, ad_code_bottom, updated_at)
             VALUES ($1, $2, $3, NOW())
             ON CONFLICT (document_id) DO UPDATE SET
                 ad_code_top = COALESCE($2, document_ad_codes.ad_code_top),
                 ad_code_bottom = COALESCE($3, document_ad_codes.ad_code_bottom),
                 updated_at = NOW()
             RETURNING ad_code_top, ad_code_bottom, updated_at",
        )
        .bind(document_id)
        .bind(update.top.as_deref().map(str::trim))
        .bind(update.bottom.as_deref().map(str::trim))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        debug!(%document_id, updated_at = %record.updated_at, "Saved ad codes");
        Ok(record.to_domain())
    }
}
