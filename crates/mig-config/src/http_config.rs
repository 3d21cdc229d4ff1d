use crate::{ConfigError, ConfigErrorResult, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};

use std::time::Duration;

use serde::Deserialize;

/// Timeout policy applied uniformly to every outbound call, source and
/// target alike.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request deadline, downloads included.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::http("http.timeout_secs must be at least 1"));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::http(
                "http.connect_timeout_secs must be at least 1",
            ));
        }

        Ok(())
    }
}
