//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{DbAdapter, MemoryAdCodeStore, OpenAiContentAdapter, TemplateContentAdapter},
    config::Config,
    error::ApiError,
    web::{router, AiReadiness, AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use revenue_content_core::ports::{AdCodeStore, ContentGenerationService};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    let ad_codes: Arc<dyn AdCodeStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let db_adapter = DbAdapter::new(db_pool);
            info!("Running database migrations...");
            db_adapter.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(db_adapter)
        }
        None => {
            warn!("DATABASE_URL is not set; ad codes will be kept in memory only.");
            Arc::new(MemoryAdCodeStore::new())
        }
    };

    // --- 3. Bring Up the AI Service ---
    // Requests that need the AI wait on the readiness cell rather than polling.
    let ai = AiReadiness::new();
    {
        let ai = ai.clone();
        let api_key = config.openai_api_key.clone();
        tokio::spawn(async move {
            let service: Arc<dyn ContentGenerationService> = match api_key {
                Some(api_key) => {
                    let openai_config = OpenAIConfig::new().with_api_key(api_key);
                    Arc::new(OpenAiContentAdapter::new(Client::with_config(openai_config)))
                }
                None => {
                    warn!("OPENAI_API_KEY is not set; articles will use the built-in draft.");
                    Arc::new(TemplateContentAdapter)
                }
            };
            ai.resolve(service);
        });
    }
    {
        let ai = ai.clone();
        tokio::spawn(async move {
            if ai.wait().await.is_some() {
                info!("AI service is ready.");
            }
        });
    }

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        ad_codes,
        ai,
    });

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| ApiError::InvalidCorsOrigin(config.cors_origin.clone()))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static("x-csrf-token"),
        ]);

    // --- 5. Create the Web Router ---
    let app = router(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
