use serde::Deserialize;
use std::{env, fs};
use tracing::debug;

use crate::error::{AppError, Result};

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "marquee.db".to_string(),
        }
    }
}

impl Config {
    /// Loads `config.toml` if present, then applies `PORT` and
    /// `DATABASE_PATH` environment overrides.
    pub fn load() -> Result<Self> {
        let mut config: Config = match fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(_) => {
                debug!("No {} found, using defaults", CONFIG_PATH);
                Config::default()
            }
        };

        if let Ok(port) = env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid PORT value '{}'", port)))?;
        }
        if let Ok(path) = env::var("DATABASE_PATH") {
            config.database.path = path;
        }

        Ok(config)
    }
}
