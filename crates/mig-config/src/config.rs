use crate::{
    ConfigError, ConfigErrorResult, HttpConfig, LoggingConfig, SourceConfig, TargetConfig,
    TransferConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub target: TargetConfig,
    pub transfer: TransferConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for MIG_CONFIG_DIR env var, else use ./.mig/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply MIG_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load from an explicit file path, bypassing directory discovery.
    /// MIG_* environment overrides still apply on top.
    pub fn load_from(path: &Path) -> ConfigErrorResult<Self> {
        let mut config = Self::load_toml(path)?;
        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: MIG_CONFIG_DIR env var > ./.mig/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("MIG_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".mig"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.source.validate()?;
        self.target.validate()?;
        self.http.validate()?;

        Ok(())
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  source: {} (version filter #{}, api key {})",
            self.source.url,
            self.source.version_id,
            key_presence(&self.source.api_key)
        );
        info!(
            "  target: {:?} (secure: {}, api key {})",
            self.target.endpoint,
            self.target.secure,
            key_presence(&self.target.api_key)
        );
        info!(
            "  target ids: project #{}, version #{}, fallback assignee #{}",
            self.target.project_id, self.target.version_id, self.target.fallback_assignee_id
        );
        info!("  transfer: on_item_error={}", self.transfer.on_item_error.as_str());
        info!(
            "  http: timeout={}s, connect_timeout={}s",
            self.http.timeout_secs, self.http.connect_timeout_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Source
        Self::apply_env_string("MIG_SOURCE_URL", &mut self.source.url);
        Self::apply_env_string("MIG_SOURCE_API_KEY", &mut self.source.api_key);
        Self::apply_env_parse("MIG_SOURCE_VERSION_ID", &mut self.source.version_id);

        // Target
        Self::apply_env_string("MIG_TARGET_ENDPOINT", &mut self.target.endpoint);
        Self::apply_env_bool("MIG_TARGET_SECURE", &mut self.target.secure);
        Self::apply_env_string("MIG_TARGET_API_KEY", &mut self.target.api_key);
        Self::apply_env_parse("MIG_TARGET_PROJECT_ID", &mut self.target.project_id);
        Self::apply_env_parse("MIG_TARGET_VERSION_ID", &mut self.target.version_id);
        Self::apply_env_parse(
            "MIG_TARGET_FALLBACK_ASSIGNEE_ID",
            &mut self.target.fallback_assignee_id,
        );

        // Transfer
        Self::apply_env_parse("MIG_TRANSFER_ON_ITEM_ERROR", &mut self.transfer.on_item_error);

        // Http
        Self::apply_env_parse("MIG_HTTP_TIMEOUT_SECS", &mut self.http.timeout_secs);
        Self::apply_env_parse(
            "MIG_HTTP_CONNECT_TIMEOUT_SECS",
            &mut self.http.connect_timeout_secs,
        );

        // Logging
        Self::apply_env_parse("MIG_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MIG_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MIG_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("MIG_LOG_DIR", &mut self.logging.dir);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

fn key_presence(key: &str) -> &'static str {
    if key.is_empty() { "missing" } else { "set" }
}
