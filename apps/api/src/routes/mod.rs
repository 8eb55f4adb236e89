pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::dashboard::handlers as dashboard;
use crate::preferences::handlers as preferences;
use crate::real_estate::handlers as real_estate;
use crate::state::AppState;

/// Uploads larger than this are rejected before extraction.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Real estate
        .route(
            "/api/v1/real-estate/metrics",
            post(real_estate::handle_metrics),
        )
        .route(
            "/api/v1/real-estate/analyze",
            post(real_estate::handle_analyze),
        )
        // Assistant
        .route("/api/v1/chat", post(assistant::handle_chat))
        .route("/api/v1/knowledge", post(assistant::handle_knowledge))
        .route("/api/v1/summarize", post(assistant::handle_summarize))
        .route(
            "/api/v1/summarize/upload",
            post(assistant::handle_summarize_upload)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Preferences
        .route(
            "/api/v1/settings",
            get(preferences::handle_get_settings).put(preferences::handle_put_settings),
        )
        .route(
            "/api/v1/conversations",
            get(preferences::handle_list_conversations),
        )
        .route(
            "/api/v1/conversations/:id",
            get(preferences::handle_get_conversation)
                .delete(preferences::handle_delete_conversation),
        )
        // Dashboard
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .with_state(state)
}
