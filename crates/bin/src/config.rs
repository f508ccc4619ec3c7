//! Demo configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
}

impl Config {
    /// Load configuration from `config.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new("config.toml");
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("No config.toml found, creating default config");
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }

    /// Resolve the bearer token from the config file or the environment.
    pub fn token(&self) -> anyhow::Result<String> {
        if !self.service.token.is_empty() {
            return Ok(self.service.token.clone());
        }
        std::env::var("PIXELS_TOKEN").map_err(|_| {
            anyhow::anyhow!("no token found: set service.token in config.toml or PIXELS_TOKEN")
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
        }
    }
}

/// Canvas service connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL of the canvas service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token. Empty means fall back to the PIXELS_TOKEN environment
    /// variable.
    #[serde(default)]
    pub token: String,
    /// Where to write the fetched canvas.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            output: default_output(),
        }
    }
}

fn default_base_url() -> String {
    "https://pixels.pythondiscord.com".to_string()
}

fn default_output() -> String {
    "canvas.png".to_string()
}
