// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{CouchError, Result};
use crate::util::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_read_timeout() -> u64 {
    300
}

impl Config {
    /// Layers `.env`, the toml file and `CLOUDANT__*` environment variables.
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CLOUDANT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| CouchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| CouchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                url: "http://127.0.0.1:5984".to_string(),
                username: None,
                password: None,
                connect_timeout_secs: default_connect_timeout(),
                read_timeout_secs: default_read_timeout(),
                user_agent: None,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.server.url)
            .map_err(|e| CouchError::Config(format!("server.url: {}", e)))?;

        if self.server.connect_timeout_secs == 0 {
            return Err(CouchError::Config(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.read_timeout_secs == 0 {
            return Err(CouchError::Config(
                "read_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.password.is_some() && self.server.username.is_none() {
            return Err(CouchError::Config(
                "password is set but username is missing".to_string(),
            ));
        }

        Ok(())
    }
}
