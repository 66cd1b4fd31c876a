// Settings module
// Application configuration persisted as TOML

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5002/api";
pub const DEFAULT_TICK_MILLIS: u64 = 1000;
pub const DEFAULT_CITY: &str = "Kanpur";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// City the marketplace currently serves.
    pub city: String,
    pub api: ApiConfig,
    pub countdown: CountdownConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            api: ApiConfig::default(),
            countdown: CountdownConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub tick_millis: u64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_millis: DEFAULT_TICK_MILLIS,
        }
    }
}

impl CountdownConfig {
    /// Tick period; a zero value falls back to one second.
    pub fn tick_period(&self) -> Duration {
        if self.tick_millis == 0 {
            Duration::from_millis(DEFAULT_TICK_MILLIS)
        } else {
            Duration::from_millis(self.tick_millis)
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err("api.base_url must not be empty".to_string());
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(format!("api.base_url must be an http(s) URL, got '{}'", base));
        }
        if self.api.timeout_secs == Some(0) {
            return Err("api.timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}
