use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the source tracker, e.g. "https://old.example.com".
    pub url: String,
    /// Static API key sent with every source request.
    pub api_key: String,
    /// Fixed-version id selecting which source issues qualify for
    /// transfer.
    pub version_id: u64,
}

impl SourceConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let host = self
            .url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"));

        match host {
            Some(host) if !host.is_empty() => {}
            _ => {
                return Err(ConfigError::source(format!(
                    "source.url must be an absolute http(s) URL, got {:?}",
                    self.url
                )));
            }
        }

        if self.api_key.is_empty() {
            return Err(ConfigError::source("source.api_key must not be empty"));
        }

        if self.version_id == 0 {
            return Err(ConfigError::source("source.version_id must be a positive id"));
        }

        Ok(())
    }
}
