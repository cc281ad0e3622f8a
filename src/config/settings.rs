//! Runtime settings read from environment variables.
//!
//! `main` calls `dotenvy::dotenv()` first, so a `.env` file in the working
//! directory works as well as a real environment.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use std::net::SocketAddr;

/// Default address the HTTP API listens on.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Default path of the group seed file.
pub const DEFAULT_GROUP_CONFIG_PATH: &str = "config.toml";

/// Everything the binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `API_BIND_ADDRESS`
    pub bind_address: SocketAddr,
    /// `GROUP_CONFIG_PATH`
    pub group_config_path: String,
    /// `DISCORD_BOT_TOKEN`; the bot is not started without it
    pub discord_token: Option<String>,
}

impl Settings {
    /// Reads settings from the process environment, applying defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = non_empty("API_BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind.parse::<SocketAddr>().map_err(|e| Error::Config {
            message: format!("Invalid API_BIND_ADDRESS '{bind}': {e}"),
        })?;

        Ok(Self {
            database_url: non_empty("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_address,
            group_config_path: non_empty("GROUP_CONFIG_PATH")
                .unwrap_or_else(|| DEFAULT_GROUP_CONFIG_PATH.to_string()),
            discord_token: non_empty("DISCORD_BOT_TOKEN"),
        })
    }
}
