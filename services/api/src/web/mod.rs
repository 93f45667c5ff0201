pub mod documents;
pub mod middleware;
pub mod protocol;
pub mod readiness;
pub mod rest;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use middleware::{require_editor, verify_csrf};
pub use readiness::AiReadiness;
pub use rest::ApiDoc;
pub use state::AppState;

/// Builds the application router: the editor API behind the token and CSRF
/// checks, plus the public Swagger UI.
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/csrf", get(documents::issue_csrf_handler))
        .route("/prompts", post(rest::build_prompt_handler))
        .route("/content", post(rest::structure_content_handler))
        .route("/articles", post(rest::generate_article_handler))
        .route(
            "/documents/{id}/ad-codes",
            get(documents::load_ad_codes_handler).put(documents::save_ad_codes_handler),
        )
        .layer(axum_middleware::from_fn(verify_csrf))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_editor,
        ))
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
