use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::Error;

/// Client configuration, loaded from a TOML file. Every field has the
/// default the original deployment ran with, so an empty file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL.
    pub base_url: String,
    /// Seconds between full-collection polling refreshes.
    pub poll_interval_secs: u64,
    /// Seconds to wait before the post-mutation resync fetch.
    pub resync_delay_secs: u64,
    pub claims_per_page: usize,
    pub items_per_page: usize,
    pub users_per_page: usize,
    pub activities_per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_owned(),
            poll_interval_secs: 300,
            resync_delay_secs: 1,
            claims_per_page: 6,
            items_per_page: 6,
            users_per_page: 8,
            activities_per_page: 5,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn resync_delay(&self) -> Duration {
        Duration::from_secs(self.resync_delay_secs)
    }
}
