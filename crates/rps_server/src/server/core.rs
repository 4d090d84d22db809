//! Core game server implementation.
//!
//! This module contains the main `GameServer` struct: it binds the shared
//! HTTP/WebSocket port, owns the connection registry and the lifecycle
//! dispatcher, and runs the accept loop until shutdown.

use crate::{
    config::ServerConfig,
    connection::ConnectionRegistry,
    error::ServerError,
    game::{ChoiceSource, SeededChoiceSource},
    server::{
        lifecycle::LifecycleHandler,
        router::{build_router, AppState},
        static_files::StaticContentServer,
    },
    shutdown::ShutdownState,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

/// The core game server structure.
///
/// `GameServer` owns everything that lives as long as the service: the
/// registry of open sessions, the source of the server's counter-choices and
/// the static file root.
///
/// # Architecture
///
/// * **HTTP front end**: an axum router serving the client and upgrading
///   `/` to WebSocket sessions
/// * **Lifecycle dispatcher**: a single task applying connection events in
///   arrival order
/// * **Registry**: shared with the dispatcher and readable for statistics
pub struct GameServer {
    /// Server configuration settings
    config: ServerConfig,

    /// Registry of open WebSocket sessions
    registry: Arc<ConnectionRegistry>,

    /// Resolver for plain HTTP requests
    static_content: Arc<StaticContentServer>,

    /// Counter-choice source, moved into the dispatcher on start
    choices: Mutex<Option<Box<dyn ChoiceSource>>>,
}

impl GameServer {
    /// Creates a new game server whose counter-choices are seeded from the clock.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_choice_source(config, Box::new(SeededChoiceSource::from_clock()))
    }

    /// Creates a new game server with a specific counter-choice source.
    pub fn with_choice_source(config: ServerConfig, choices: Box<dyn ChoiceSource>) -> Self {
        let static_content = Arc::new(StaticContentServer::new(config.static_dir.clone()));
        Self {
            config,
            registry: Arc::new(ConnectionRegistry::new()),
            static_content,
            choices: Mutex::new(Some(choices)),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the registry of open sessions.
    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        self.registry.clone()
    }

    /// Binds the configured address.
    ///
    /// # Returns
    ///
    /// The listener, or `ServerError::Network` if the address cannot be bound.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        TcpListener::bind(self.config.bind_address)
            .await
            .map_err(|e| ServerError::Network(format!("Failed to bind {}: {e}", self.config.bind_address)))
    }

    /// Starts the game server and runs until the process exits.
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown_state(ShutdownState::new()).await
    }

    /// Binds the configured address and serves until shutdown is initiated.
    pub async fn start_with_shutdown_state(&self, shutdown_state: ShutdownState) -> Result<(), ServerError> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_state).await
    }

    /// Serves HTTP and WebSocket traffic on an already bound listener.
    ///
    /// # Startup Sequence
    ///
    /// 1. Spawn the lifecycle dispatcher with the counter-choice source
    /// 2. Serve the router, one task per connection
    /// 3. Stop accepting once `shutdown_state` is initiated
    ///
    /// A server can only be served once; a second call fails with
    /// `ServerError::Internal`.
    pub async fn serve(&self, listener: TcpListener, shutdown_state: ShutdownState) -> Result<(), ServerError> {
        let choices = self.take_choices()?;

        let local_addr = listener.local_addr()?;
        info!("🚀 Server running at http://{}", local_addr);
        info!("📂 Serving static files from {}", self.static_content.root().display());

        let (events, event_receiver) = mpsc::unbounded_channel();
        let dispatcher = LifecycleHandler::new(self.registry.clone(), choices);
        tokio::spawn(dispatcher.run(event_receiver));

        let router = build_router(AppState {
            registry: self.registry.clone(),
            events,
            static_content: self.static_content.clone(),
        });

        axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(async move {
                shutdown_state.wait().await;
                info!("🛑 Accept loop stopping - shutdown initiated");
            })
            .await?;

        info!(
            "🧹 Server stopped accepting with {} client(s) connected",
            self.registry.count().await
        );
        Ok(())
    }

    /// Moves the counter-choice source out for the dispatcher.
    fn take_choices(&self) -> Result<Box<dyn ChoiceSource>, ServerError> {
        let mut slot = self
            .choices
            .lock()
            .map_err(|_| ServerError::Internal("Choice source lock poisoned".to_string()))?;

        slot.take()
            .ok_or_else(|| ServerError::Internal("Server has already been started".to_string()))
    }
}
