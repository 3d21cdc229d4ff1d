mod endpoint;
mod error;
mod source;
mod target;

#[cfg(test)]
mod tests;

pub use endpoint::{Endpoint, resolve_endpoint};
pub use error::{ClientError, ClientResult};
pub use source::SourceClient;
pub use target::TargetClient;

/// Header carrying the static API key on every request to either tracker.
pub(crate) const API_KEY_HEADER: &str = "X-Redmine-API-Key";
