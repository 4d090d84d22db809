//! HTTP routing for the shared listening port.

use crate::{
    connection::ConnectionRegistry,
    server::{handlers, lifecycle::ConnectionEvent, static_files::StaticContentServer},
};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Registry of open sessions, used for ID allocation
    pub registry: Arc<ConnectionRegistry>,
    /// Channel into the lifecycle dispatcher
    pub events: mpsc::UnboundedSender<ConnectionEvent>,
    /// Resolver for plain HTTP requests
    pub static_content: Arc<StaticContentServer>,
}

/// Builds the router: `/` upgrades to WebSocket or serves `index.html`,
/// every other path is a static file.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_handler))
        .fallback(handlers::static_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
