// src/config.rs
use anyhow::{Context, Result};
use log::warn;
use std::env;

pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub yahoo_base_url: String,
    pub yahoo_user_agent: String,
}

impl AppConfig {
    /// Reads the environment, after loading `.env` if one is present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(port_str) => port_str
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number, got {:?}", port_str))?,
            Err(_) => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        Ok(AppConfig {
            port,
            yahoo_base_url: env_or("YAHOO_BASE_URL", DEFAULT_YAHOO_BASE_URL),
            yahoo_user_agent: env_or("YAHOO_USER_AGENT", DEFAULT_USER_AGENT),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
