//! # Rock-Paper-Scissors Server
//!
//! A small real-time game backend. Browsers load the client from the same
//! port they later upgrade to a WebSocket on; each text frame they send is
//! one round against the server, and every connect or disconnect is
//! announced to all open sessions.
//!
//! ## Architecture Overview
//!
//! ### Core Components
//!
//! * **Connection Registry** - The ordered set of open sessions
//! * **Broadcaster** - Fan-out of one frame to a registry snapshot
//! * **Round Resolver** - Counter-choice draw and outcome table
//! * **Lifecycle Handler** - Applies connect/message/disconnect events one at a time
//! * **Static Content** - Serves the browser client over plain HTTP
//!
//! ### Message Flow
//!
//! 1. Client upgrades to WebSocket (optionally with the `game-protocol` sub-protocol)
//! 2. Everyone receives `Connected clients: N`
//! 3. Client sends `0`, `1` or `2`
//! 4. Only that client receives `Result: <label> (You: <c>, Server: <s>)`
//! 5. On disconnect the remaining clients receive the new count
//!
//! ## Example
//!
//! ```rust,no_run
//! use rps_server::{GameServer, ServerConfig, ShutdownState};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), rps_server::ServerError> {
//! let server = GameServer::new(ServerConfig::default());
//! server.start_with_shutdown_state(ShutdownState::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The server uses structured error types ([`ServerError`]) to categorize failures:
//!
//! * **Network errors** - Binding, handshake and delivery issues
//! * **Internal errors** - A stopped dispatcher or a server started twice
//! * **I/O errors** - Socket and filesystem failures
//!
//! Errors inside one connection are logged and never reach other sessions.

// Re-export core types and functions for easy access
pub use config::ServerConfig;
pub use error::ServerError;
pub use server::GameServer;
pub use shutdown::ShutdownState;
pub use utils::{create_server, create_server_with_config};

// Public module declarations
pub mod config;
pub mod connection;
pub mod error;
pub mod game;
pub mod messaging;
pub mod server;
pub mod shutdown;
pub mod utils;
