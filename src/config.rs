//! Configuration management.
//!
//! Settings are organized into logical sections, loaded from a TOML file and
//! validated before the server starts:
//!
//! - [`ServerConfig`] - Network listener settings
//! - [`GameConfig`] - Gameplay timing settings
//! - [`LoggingConfig`] - Logging verbosity
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:3000"
//!
//! [game]
//! respawn_tick_ms = 1000
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field carries a serde default so a partial (or absent) section
//! still yields a runnable configuration.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the WebSocket listener binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// How often the respawn queue is polled, in milliseconds.
    #[serde(default = "default_respawn_tick_ms")]
    pub respawn_tick_ms: u64,
}

fn default_respawn_tick_ms() -> u64 {
    1000
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            respawn_tick_ms: default_respawn_tick_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter: error, warn, info, debug, or trace.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(anyhow!(
                "Invalid server.bind address: {}",
                self.server.bind
            ));
        }
        if self.game.respawn_tick_ms == 0 {
            return Err(anyhow!("game.respawn_tick_ms must be greater than zero"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(anyhow!("Invalid logging.level: {}", other)),
        }
    }
}
