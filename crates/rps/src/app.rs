//! Main application logic and lifecycle management.
//!
//! This module contains the `Application` struct that merges configuration
//! sources, runs the game server and coordinates graceful shutdown.

use crate::{
    cli::CliArgs,
    config::AppConfig,
    logging::display_banner,
    signals::{spawn_forced_exit_handler, wait_for_shutdown_signal},
};
use rps_server::{GameServer, ShutdownState};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

/// How long the accept loop gets to wind down after a shutdown signal.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Main application struct.
///
/// Owns the merged configuration and the game server until `run` hands the
/// server over to its own task.
pub struct Application {
    /// Merged application configuration
    config: AppConfig,
    /// Game server instance
    server: GameServer,
}

impl Application {
    /// Creates a new application instance.
    ///
    /// # Process
    ///
    /// 1. Load configuration from file (creating default if missing)
    /// 2. Apply command-line argument overrides
    /// 3. Validate merged configuration
    /// 4. Display startup banner
    /// 5. Initialize game server with configuration
    pub async fn new(args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        info!("🔧 Loading configuration from: {}", args.config_path.display());
        let mut config = AppConfig::load_from_file(&args.config_path).await?;
        apply_overrides(&mut config, &args);

        if let Err(e) = config.validate() {
            return Err(format!("Configuration validation failed: {e}").into());
        }
        info!("✅ Configuration loaded and validated successfully");

        display_banner();

        let server_config = config.to_server_config()?;
        if !Path::new(&server_config.static_dir).is_dir() {
            warn!(
                "📂 Static directory {} does not exist, every page request will be a 404",
                server_config.static_dir.display()
            );
        }
        let server = GameServer::new(server_config);

        Ok(Self { config, server })
    }

    /// Runs the server until a termination signal arrives.
    ///
    /// Binding happens before the server task is spawned so that an unusable
    /// address is reported as an error from this function.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        info!("🌟 Starting Rock Paper Scissors server");
        self.log_configuration_summary();

        let listener = self.server.bind().await?;
        let registry = self.server.registry();
        let shutdown_state = ShutdownState::new();

        let server_handle = {
            let server = self.server;
            let shutdown_state = shutdown_state.clone();
            tokio::spawn(async move {
                match server.serve(listener, shutdown_state).await {
                    Ok(()) => info!("✅ Server completed successfully"),
                    Err(e) => error!("❌ Server error: {:?}", e),
                }
            })
        };

        info!("🛑 Press Ctrl+C to gracefully shutdown");

        wait_for_shutdown_signal(&shutdown_state).await?;
        spawn_forced_exit_handler();

        info!("⏳ Waiting for the accept loop to stop...");
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, server_handle).await {
            Ok(Ok(())) => info!("✅ Server task completed gracefully"),
            Ok(Err(e)) => error!("❌ Server task failed: {}", e),
            Err(_) => warn!("⏰ Server task did not complete within {:?}", SHUTDOWN_TIMEOUT),
        }

        info!("📊 Final Statistics:");
        info!("  - Connected clients: {}", registry.count().await);
        info!("✅ Rock Paper Scissors server shutdown complete");

        Ok(())
    }

    /// Logs the configuration summary at startup.
    fn log_configuration_summary(&self) {
        info!("📋 Configuration Summary:");
        info!("  🌐 Bind address: {}", self.config.server.bind_address);
        info!("  📂 Static directory: {}", self.config.server.static_dir);
        info!(
            "  📝 Log level: {} (json: {})",
            self.config.logging.level, self.config.logging.json_format
        );
    }
}

/// Applies command-line overrides on top of the file configuration.
pub fn apply_overrides(config: &mut AppConfig, args: &CliArgs) {
    if let Some(bind_address) = &args.bind_address {
        config.server.bind_address = bind_address.clone();
    }

    if let Some(static_dir) = &args.static_dir {
        config.server.static_dir = static_dir.to_string_lossy().to_string();
    }

    if let Some(log_level) = &args.log_level {
        config.logging.level = log_level.clone();
    }

    if args.json_logs {
        config.logging.json_format = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(config_path: PathBuf) -> CliArgs {
        CliArgs {
            config_path,
            bind_address: None,
            static_dir: None,
            log_level: None,
            json_logs: false,
        }
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = AppConfig::default();
        let mut cli = args(PathBuf::from("config.toml"));
        cli.bind_address = Some("127.0.0.1:9000".to_string());
        cli.static_dir = Some(PathBuf::from("public"));
        cli.log_level = Some("debug".to_string());
        cli.json_logs = true;

        apply_overrides(&mut config, &cli);

        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(config.server.static_dir, "public");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_no_overrides_keeps_file_values() {
        let mut config = AppConfig::default();
        config.logging.json_format = true;

        apply_overrides(&mut config, &args(PathBuf::from("config.toml")));

        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        // The flag only ever turns JSON output on
        assert!(config.logging.json_format);
    }

    #[tokio::test]
    async fn test_application_creation() {
        let dir = TempDir::new().expect("create temp dir");
        let mut cli = args(dir.path().join("config.toml"));
        cli.bind_address = Some("127.0.0.1:0".to_string());
        cli.static_dir = Some(dir.path().to_path_buf());

        let app = Application::new(cli).await.expect("application builds");
        assert_eq!(app.config.server.bind_address, "127.0.0.1:0");
        assert!(dir.path().join("config.toml").exists());
    }

    #[tokio::test]
    async fn test_invalid_override_fails_validation() {
        let dir = TempDir::new().expect("create temp dir");
        let mut cli = args(dir.path().join("config.toml"));
        cli.log_level = Some("loud".to_string());

        assert!(Application::new(cli).await.is_err());
    }
}
