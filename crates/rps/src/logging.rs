//! Tracing subscriber setup for the `rps` binary.

use crate::config::LoggingSettings;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` if present, otherwise the configured level.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the global subscriber.
///
/// JSON output is used when either the config file or `--json-logs` asks
/// for it. Fails if a subscriber is already installed.
pub fn setup_logging(
    config: &LoggingSettings,
    json_format: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = fmt::layer().with_target(false).with_thread_ids(true);
    let subscriber = tracing_subscriber::registry().with(level_filter(&config.level));

    if json_format || config.json_format {
        subscriber.with(output.json()).try_init()?;
    } else {
        subscriber.with(output).try_init()?;
    }

    info!("🔧 Logging ready at level {}", config.level);
    Ok(())
}

pub fn display_banner() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("UNK");
    info!("╔══════════════════════════════════════════╗");
    info!("║       ✊ ✋ ✌  ROCK PAPER SCISSORS        ║");
    info!("║              Server v{:<20}║", version);
    info!("║                                          ║");
    info!("║  🌐 HTTP + WebSocket on one port         ║");
    info!("║  🎲 One round per message                ║");
    info!("╚══════════════════════════════════════════╝");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_accepts_configured_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let filter = level_filter(level);
            assert!(!filter.to_string().is_empty());
        }
    }

    #[test]
    fn test_second_install_is_an_error() {
        let settings = LoggingSettings::default();
        // Whichever call installs first, the other must fail instead of panicking
        let first = setup_logging(&settings, false);
        let second = setup_logging(&settings, true);
        assert!(first.is_err() || second.is_err());
    }
}
