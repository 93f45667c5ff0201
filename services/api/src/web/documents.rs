//! services/api/src/web/documents.rs
//!
//! Endpoints for a document's saved ad codes and for issuing the CSRF token
//! the editor echoes back on every mutating request.

use crate::web::{
    middleware::CSRF_COOKIE,
    protocol::{AdCodesResponse, CsrfTokenResponse, SaveAdCodesRequest},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use revenue_content_core::{ports::AdCodeUpdate, AdSlots};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// GET /documents/{id}/ad-codes - Read a document's ad codes
#[utoipa::path(
    get,
    path = "/documents/{id}/ad-codes",
    params(("id" = Uuid, Path, description = "Document id")),
    responses(
        (status = 200, description = "Saved ad codes", body = AdCodesResponse),
        (status = 401, description = "Missing or wrong editor token"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn load_ad_codes_handler(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<AdCodesResponse>, (StatusCode, String)> {
    let slots = state
        .ad_codes
        .load_ad_codes(document_id)
        .await
        .map_err(|e| {
            error!("Failed to load ad codes for {}: {:?}", document_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load ad codes".to_string(),
            )
        })?;

    Ok(Json(ad_codes_response(document_id, slots)))
}

/// PUT /documents/{id}/ad-codes - Save a document's ad codes
#[utoipa::path(
    put,
    path = "/documents/{id}/ad-codes",
    params(("id" = Uuid, Path, description = "Document id")),
    request_body = SaveAdCodesRequest,
    responses(
        (status = 200, description = "Ad codes saved", body = AdCodesResponse),
        (status = 204, description = "Autosave acknowledged; nothing written"),
        (status = 401, description = "Missing or wrong editor token"),
        (status = 403, description = "Missing or mismatched CSRF token"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn save_ad_codes_handler(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<Uuid>,
    Json(req): Json<SaveAdCodesRequest>,
) -> Result<Response, (StatusCode, String)> {
    if req.autosave {
        debug!("Skipping ad code write for autosave of {}", document_id);
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let update = AdCodeUpdate {
        top: req.ad_code_top,
        bottom: req.ad_code_bottom,
    };
    let slots = state
        .ad_codes
        .save_ad_codes(document_id, &update)
        .await
        .map_err(|e| {
            error!("Failed to save ad codes for {}: {:?}", document_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save ad codes".to_string(),
            )
        })?;

    info!("Saved ad codes for document {}", document_id);
    Ok(Json(ad_codes_response(document_id, slots)).into_response())
}

/// GET /csrf - Issue a CSRF token
///
/// The token is set as a cookie and returned in the body; mutating requests
/// must send it back in the `x-csrf-token` header.
#[utoipa::path(
    get,
    path = "/csrf",
    responses(
        (status = 200, description = "Token issued", body = CsrfTokenResponse),
        (status = 401, description = "Missing or wrong editor token")
    )
)]
pub async fn issue_csrf_handler() -> impl IntoResponse {
    let token = Uuid::new_v4().to_string();
    let cookie = format!("{}={}; Path=/; SameSite=Strict", CSRF_COOKIE, token);

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(CsrfTokenResponse { token }),
    )
}

fn ad_codes_response(document_id: Uuid, slots: AdSlots) -> AdCodesResponse {
    AdCodesResponse {
        document_id,
        ad_code_top: slots.top,
        ad_code_bottom: slots.bottom,
    }
}
