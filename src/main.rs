//! LearnHub Widget Service
//!
//! Local companion service of the learning widget: runs the skill quiz and
//! recommendation ranking over the widget state and relays the learning
//! backend's chat, recommendation and interaction endpoints.

mod api;
mod catalog;
mod client;
mod config;
mod db;
mod errors;
mod models;
mod quiz;
mod ranker;
mod tips;
mod widget;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use widget::Widget;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub widget: Arc<Widget>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting LearnHub widget service");
    tracing::info!("Learning backend: {}", config.api_base_url);
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.request_timeout.is_none() {
        tracing::debug!("No backend request timeout configured");
    }

    // Restore the widget from the stored history
    let widget = Arc::new(Widget::open(&config).await?);

    // Create application state
    let state = AppState { widget };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Widget state
        .route("/state", get(api::get_state))
        .route("/interests", post(api::select_interest))
        .route("/interests/{interest}", delete(api::deselect_interest))
        .route("/tab", put(api::switch_tab))
        .route("/tips", get(api::get_tips))
        .route("/content", get(api::get_content))
        // Quiz
        .route("/quiz", post(api::start_quiz).get(api::get_quiz))
        .route("/quiz/answer", post(api::answer_question))
        .route("/quiz/skip", post(api::skip_question))
        // Learning backend
        .route("/recommendations", post(api::refresh_recommendations))
        .route(
            "/platforms",
            post(api::refresh_platforms).get(api::get_platforms),
        )
        .route("/topic-platforms", get(api::get_topic_platforms))
        .route("/chat", post(api::chat))
        // Courses
        .route("/courses/{id}/start", post(api::start_course))
        .route("/courses/{id}/complete", post(api::complete_course))
        .route("/courses/{id}/like", post(api::like_course));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
