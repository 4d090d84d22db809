//! Configuration management for the game server.
//!
//! This module handles loading, validation, and conversion of server
//! configuration from TOML files and command-line arguments.

use rps_server::ServerConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Server-specific configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Network address to bind the server to (e.g., "0.0.0.0:8080")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Directory the browser client is served from
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file does not exist, it is created with the default settings
    /// and those defaults are returned.
    pub async fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Converts the validated settings into the library's `ServerConfig`.
    pub fn to_server_config(&self) -> Result<ServerConfig, Box<dyn std::error::Error>> {
        let bind_address: SocketAddr = self.server.bind_address.parse()?;
        Ok(ServerConfig {
            bind_address,
            static_dir: PathBuf::from(&self.server.static_dir),
        })
    }

    /// Validates the configuration settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.bind_address.parse::<SocketAddr>().is_err() {
            return Err(format!(
                "Invalid bind address: {}",
                &self.server.bind_address
            ));
        }

        if self.server.static_dir.is_empty() {
            return Err("Static directory cannot be empty".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.server.static_dir, "static");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_from_nonexistent_file_creates_it() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("config.toml");

        let config = AppConfig::load_from_file(&path).await.expect("defaults load");
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        // The written file loads back to the same settings
        let reloaded = AppConfig::load_from_file(&path).await.expect("written file loads");
        assert_eq!(reloaded, config);
    }

    #[tokio::test]
    async fn test_load_from_existing_file() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("custom.toml");
        tokio::fs::write(
            &path,
            r#"
[server]
bind_address = "127.0.0.1:9090"
static_dir = "/srv/rps"

[logging]
level = "debug"
json_format = true
"#,
        )
        .await
        .expect("write config");

        let config = AppConfig::load_from_file(&path).await.expect("config loads");
        assert_eq!(config.server.bind_address, "127.0.0.1:9090");
        assert_eq!(config.server.static_dir, "/srv/rps");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("partial.toml");
        tokio::fs::write(&path, "[logging]\nlevel = \"warn\"\n")
            .await
            .expect("write config");

        let config = AppConfig::load_from_file(&path).await.expect("config loads");
        assert_eq!(config.server, ServerSettings::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[tokio::test]
    async fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("broken.toml");
        tokio::fs::write(&path, "[server\nbind_address = ")
            .await
            .expect("write config");

        assert!(AppConfig::load_from_file(&path).await.is_err());
    }

    #[test]
    fn test_to_server_config_conversion() {
        let mut config = AppConfig::default();
        config.server.bind_address = "127.0.0.1:7000".to_string();
        config.server.static_dir = "public".to_string();

        let server_config = config.to_server_config().expect("valid conversion");
        assert_eq!(server_config.bind_address, "127.0.0.1:7000".parse().expect("valid address"));
        assert_eq!(server_config.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = AppConfig::default();
        config.server.bind_address = "invalid".to_string();
        assert!(config.validate().is_err());
        assert!(config.to_server_config().is_err());

        let mut config = AppConfig::default();
        config.server.static_dir = String::new();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_log_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let mut config = AppConfig::default();
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "level {level} should be accepted");
        }
    }
}
