// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    analyze_handler, chat_handler, health_handler, home_handler, metrics_handler,
    not_found_handler,
};
use super::middleware::{cors_layer, request_id_layers};
use crate::config::AppConfig;
use crate::error::Result;
use crate::gateway::GatewayClient;
use crate::relay::Relay;
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub relay: Arc<Relay>,
}

pub fn create_router(config: AppConfig, client: GatewayClient) -> Result<Router> {
    let max_body_bytes = config.limits.max_body_bytes;
    let enable_compression = config.server.enable_compression;

    let state = AppState {
        config: Arc::new(config),
        relay: Arc::new(Relay::new(client)),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/chat", post(chat_handler))
        .route("/analyze", post(analyze_handler))
        .fallback(not_found_handler)
        // Base64 inflates images by a third, so the body cap sits above the
        // image cap; the image cap itself is enforced after decoding.
        // Extractors surface the body cap as a rejection the handlers map.
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors_layer());

    let app = if enable_compression {
        app.layer(CompressionLayer::new())
    } else {
        app
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
