//! Core server implementation and connection handling.
//!
//! This module contains the main game server structure, the HTTP router and
//! session handlers, the lifecycle dispatcher and the static file collaborator.

pub mod core;
pub mod handlers;
pub mod lifecycle;
pub mod router;
pub mod static_files;

pub use core::GameServer;
pub use lifecycle::{ConnectionEvent, LifecycleHandler};
pub use router::{build_router, AppState};
pub use static_files::{StaticContentServer, StaticFile};
