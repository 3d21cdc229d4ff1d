mod config;
mod error;
mod http_config;
mod item_error_policy;
mod log_level;
mod logging_config;
mod source_config;
mod target_config;
mod transfer_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use http_config::HttpConfig;
pub use item_error_policy::ItemErrorPolicy;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use source_config::SourceConfig;
pub use target_config::TargetConfig;
pub use transfer_config::TransferConfig;

const DEFAULT_SECURE: bool = false;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
