use crate::{ConfigError, ConfigErrorResult, DEFAULT_SECURE};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Where the target tracker lives. Accepts a bare host, host:port, or
    /// a full URL; the endpoint resolver sorts it out at startup.
    pub endpoint: String,
    /// Scheme to assume when `endpoint` does not name one.
    pub secure: bool,
    /// Static API key sent with every target request.
    pub api_key: String,
    /// Project the transferred issues are created in.
    pub project_id: u64,
    /// Version every created issue is pinned to.
    pub version_id: u64,
    /// User every created issue is assigned to; source accounts have no
    /// counterpart on the target side.
    pub fallback_assignee_id: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            secure: DEFAULT_SECURE,
            api_key: String::new(),
            project_id: 0,
            version_id: 0,
            fallback_assignee_id: 0,
        }
    }
}

impl TargetConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.api_key.is_empty() {
            return Err(ConfigError::target("target.api_key must not be empty"));
        }

        if self.project_id == 0 {
            return Err(ConfigError::target("target.project_id must be a positive id"));
        }

        if self.version_id == 0 {
            return Err(ConfigError::target("target.version_id must be a positive id"));
        }

        if self.fallback_assignee_id == 0 {
            return Err(ConfigError::target(
                "target.fallback_assignee_id must be a positive id",
            ));
        }

        Ok(())
    }
}
