use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::Level;

use crate::services::storage::LocalStorage;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const KEY_CONFIG: &str = "chat_config_v1";

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("CHAT_API_URL").unwrap_or(DEFAULT_API_URL).to_string(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Reads the stored override from localStorage, falling back to the build defaults.
    pub fn load() -> Self {
        Self::resolve(LocalStorage::get(KEY_CONFIG))
    }

    pub fn resolve(stored: Option<AppConfig>) -> Self {
        let defaults = Self::default();
        let mut config = match stored {
            Some(stored) => Self {
                api_base_url: if stored.api_base_url.trim().is_empty() {
                    defaults.api_base_url
                } else {
                    stored.api_base_url
                },
                log_level: stored.log_level,
            },
            None => defaults,
        };
        config.api_base_url = config.api_base_url.trim().trim_end_matches('/').to_string();
        config
    }

    pub fn max_level(&self) -> Level {
        Level::from_str(self.log_level.trim()).unwrap_or(Level::INFO)
    }
}
