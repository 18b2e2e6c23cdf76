// src/config.rs
use std::time::Duration;

use crate::error::{ClientError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("chat-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Read settings from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("CHAT_BASE_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ClientError::Config(format!(
                    "CHAT_BASE_URL must be an http(s) URL, got '{}'",
                    url
                )));
            }
            config.base_url = url;
        }

        if let Some(secs) = lookup("CHAT_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ClientError::Config(format!("CHAT_TIMEOUT_SECS is not a number: '{}'", secs))
            })?;
            if secs == 0 {
                return Err(ClientError::Config("CHAT_TIMEOUT_SECS must be positive".into()));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(agent) = lookup("CHAT_USER_AGENT").filter(|a| !a.trim().is_empty()) {
            config.user_agent = agent;
        }

        Ok(config)
    }
}
