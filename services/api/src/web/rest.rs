//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the content pipeline endpoints and the
//! master definition for the OpenAPI specification.

use crate::web::{
    documents,
    protocol::{
        AdCodesResponse, BuildPromptRequest, BuildPromptResponse, ContentResponse,
        CsrfTokenResponse, GenerateArticleRequest, GenerateArticleResponse, SaveAdCodesRequest,
        StructureContentRequest,
    },
    state::AppState,
};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{Datelike, Utc};
use revenue_content_core::{
    domain::{looks_like_html, AdSlots, GenerationRequest},
    html::strip_tags,
    prompt::{build_prompt, suggest_title},
    reply::{extract_generated_text, AiReply, GenerationError},
    scorer, structurer,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;

/// Status message returned with every successfully structured article.
pub const SUCCESS_MESSAGE: &str = "SEO-optimized content generated successfully!";

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        build_prompt_handler,
        structure_content_handler,
        generate_article_handler,
        documents::load_ad_codes_handler,
        documents::save_ad_codes_handler,
        documents::issue_csrf_handler,
    ),
    components(
        schemas(
            BuildPromptRequest,
            BuildPromptResponse,
            StructureContentRequest,
            GenerateArticleRequest,
            GenerateArticleResponse,
            ContentResponse,
            SaveAdCodesRequest,
            AdCodesResponse,
            CsrfTokenResponse,
        )
    ),
    tags(
        (name = "Revenue Content API", description = "Prompting, structuring and SEO scoring of monetized articles.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Build the AI prompt for a topic and keyword.
///
/// The browser sends the returned prompt to the AI itself and posts the
/// reply to `/content`.
#[utoipa::path(
    post,
    path = "/prompts",
    request_body = BuildPromptRequest,
    responses(
        (status = 200, description = "Prompt built", body = BuildPromptResponse),
        (status = 400, description = "Missing topic or keyword"),
        (status = 403, description = "Missing or mismatched CSRF token")
    )
)]
pub async fn build_prompt_handler(
    Json(req): Json<BuildPromptRequest>,
) -> Result<Json<BuildPromptResponse>, (StatusCode, String)> {
    let ads = AdSlots::new(req.ad_code_top, req.ad_code_bottom);
    let request = GenerationRequest::new(&req.topic, &req.keyword, ads)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let prompt = build_prompt(&request.topic, &request.keyword);
    let suggested_title = suggest_title(&request.topic, &request.keyword, Utc::now().year());
    let warnings = ad_code_warnings(&request.ads);

    Ok(Json(BuildPromptResponse {
        prompt,
        topic: request.topic,
        keyword: request.keyword,
        ad_code_top: request.ads.top,
        ad_code_bottom: request.ads.bottom,
        use_client_generation: true,
        suggested_title,
        warnings,
    }))
}

/// Structure and score an AI reply produced in the browser.
#[utoipa::path(
    post,
    path = "/content",
    request_body = StructureContentRequest,
    responses(
        (status = 200, description = "Article structured and scored", body = ContentResponse),
        (status = 400, description = "Missing keyword"),
        (status = 403, description = "Missing or mismatched CSRF token"),
        (status = 422, description = "The AI reply was unrecognizable or too short")
    )
)]
pub async fn structure_content_handler(
    Json(req): Json<StructureContentRequest>,
) -> Result<Json<ContentResponse>, (StatusCode, String)> {
    let keyword = strip_tags(&req.keyword);
    if keyword.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "A target keyword is required".to_string()));
    }

    let text = AiReply::from_value(req.ai_content)
        .ok_or(GenerationError::UnrecognizedReply)
        .and_then(|reply| extract_generated_text(&reply))
        .map_err(|e| {
            warn!("Rejected AI reply: {}", e);
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        })?;

    let ads = AdSlots::new(req.ad_code_top, req.ad_code_bottom);
    Ok(Json(render_article(&text, &keyword, &ads)))
}

/// Generate, structure and score an article entirely on the server.
#[utoipa::path(
    post,
    path = "/articles",
    request_body = GenerateArticleRequest,
    responses(
        (status = 200, description = "Article generated", body = GenerateArticleResponse),
        (status = 400, description = "Missing topic or keyword"),
        (status = 403, description = "Missing or mismatched CSRF token"),
        (status = 502, description = "The AI failed or returned too little text"),
        (status = 503, description = "The AI service is not ready")
    )
)]
pub async fn generate_article_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<GenerateArticleRequest>,
) -> Result<Json<GenerateArticleResponse>, (StatusCode, String)> {
    // Validate before touching storage or the AI.
    let mut request = GenerationRequest::new(&req.topic, &req.keyword, AdSlots::default())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut ads = AdSlots::new(req.ad_code_top, req.ad_code_bottom);
    if let Some(document_id) = req.document_id {
        let saved = app_state
            .ad_codes
            .load_ad_codes(document_id)
            .await
            .map_err(|e| {
                error!("Failed to load ad codes for {}: {:?}", document_id, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to load saved ad codes".to_string(),
                )
            })?;
        ads.top = ads.top.or(saved.top);
        ads.bottom = ads.bottom.or(saved.bottom);
    }
    request.ads = ads;

    let service = tokio::time::timeout(app_state.config.ai_ready_timeout, app_state.ai.wait())
        .await
        .ok()
        .flatten()
        .ok_or_else(|| {
            warn!("AI service not ready after {:?}", app_state.config.ai_ready_timeout);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "The AI service is not ready yet. Please try again shortly.".to_string(),
            )
        })?;

    let prompt = build_prompt(&request.topic, &request.keyword);
    info!(topic = %request.topic, keyword = %request.keyword, "Generating article");

    let reply = service
        .generate(&prompt, &app_state.config.ai, &request)
        .await
        .map_err(|e| {
            error!("AI generation failed: {:?}", e);
            (
                StatusCode::BAD_GATEWAY,
                format!("AI content generation failed: {}", e),
            )
        })?;

    let text = extract_generated_text(&reply).map_err(|e| {
        warn!("AI reply rejected: {}", e);
        (StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    let result = render_article(&text, &request.keyword, &request.ads);
    Ok(Json(GenerateArticleResponse {
        prompt,
        suggested_title: suggest_title(&request.topic, &request.keyword, Utc::now().year()),
        result,
    }))
}

//=========================================================================================
// Helpers
//=========================================================================================

/// Structures the AI text, scores the result and wraps both for the client.
///
/// AI text is never trusted; ad codes are editor input and are kept as-is,
/// since ad network embeds need their `<script>` tags.
fn render_article(text: &str, keyword: &str, ads: &AdSlots) -> ContentResponse {
    let rendered = structurer::structure_untrusted(text, keyword, ads);
    let seo_score = scorer::score(&rendered.html, keyword);
    info!(
        sections = rendered.article.sections.len(),
        score = seo_score.score,
        grade = %seo_score.grade,
        "Article structured"
    );

    ContentResponse {
        content: rendered.html,
        seo_summary: seo_score.summary().to_string(),
        seo_score,
        message: SUCCESS_MESSAGE.to_string(),
    }
}

fn ad_code_warnings(ads: &AdSlots) -> Vec<String> {
    if ads.is_empty() {
        return vec!["No ad codes were given; the article will carry no ads.".to_string()];
    }

    [("Top", &ads.top), ("Bottom", &ads.bottom)]
        .into_iter()
        .filter_map(|(slot, code)| {
            code.as_deref()
                .filter(|code| !looks_like_html(code))
                .map(|_| format!("{slot} ad code does not look like HTML; paste the full embed code."))
        })
        .collect()
}
