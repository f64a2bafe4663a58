//! Configuration types for sensord.
//!
//! [`Config::load`] layers the built-in defaults, an optional TOML file, and
//! `SENSORD_*` environment overrides (double-underscore separator, e.g.
//! `SENSORD_FEED__SYNTHETIC=true`). The bare `PORT` variable is honored on
//! top, matching how the original deployment was pointed at its port.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem or environment (useful in tests).

use std::path::Path;

use serde::Deserialize;

use crate::types::{SchemaMode, UnknownSchemaMode};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
port = 8080

[feed]
synthetic = false
schema = "single-metric"
tick_ms = 1000
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// `[server]` section — the dashboard push channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

/// `[feed]` section — input source selection and schema mode.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Run the synthetic generator instead of the live stdin feed.
    #[serde(default)]
    pub synthetic: bool,
    /// Schema mode name; see [`SchemaMode`] for the accepted values.
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Synthetic generator cadence in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Column names for passthrough mode's named mapping. Leave unset to
    /// forward rows as ordered sequences.
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

fn default_port() -> u16 {
    8080
}
fn default_schema() -> String {
    "single-metric".to_string()
}
fn default_tick_ms() -> u64 {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            synthetic: false,
            schema: default_schema(),
            tick_ms: default_tick_ms(),
            columns: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load with layering: built-in defaults, then `path` (when given), then
    /// `SENSORD_*` environment overrides, then bare `PORT`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(config::Environment::with_prefix("SENSORD").separator("__"));

        let mut cfg: Config = builder.build()?.try_deserialize()?;
        if let Ok(port) = std::env::var("PORT") {
            cfg.server.port = port.parse()?;
        }
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem or the
    /// environment.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Parse and validate the configured schema mode.
    pub fn schema_mode(&self) -> Result<SchemaMode, UnknownSchemaMode> {
        self.feed.schema.parse()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.server.port, 8080);
        assert!(!cfg.feed.synthetic);
        assert_eq!(cfg.feed.tick_ms, 1000);
        assert_eq!(cfg.feed.columns, None);
        assert_eq!(cfg.schema_mode().unwrap(), SchemaMode::SingleMetric);
    }

    #[test]
    fn bad_schema_name_is_rejected() {
        let mut cfg = Config::defaults();
        cfg.feed.schema = "auto".to_string();
        assert!(cfg.schema_mode().is_err());
    }
}
