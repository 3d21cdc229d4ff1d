use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors produced by the source and target HTTP clients.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {url}: {body} {location}")]
    Status {
        status: u16,
        url: String,
        body: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("upload rejected ({reason}, HTTP {status}) {location}")]
    Upload {
        status: u16,
        reason: &'static str,
        location: ErrorLocation,
    },
}

impl ClientError {
    /// Status-code error with the response body captured for the logs.
    #[track_caller]
    pub fn status(status: reqwest::StatusCode, url: &str, body: String) -> Self {
        ClientError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            body,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Classify a rejected upload so the caller can log a specific cause.
    #[track_caller]
    pub fn upload_rejected(status: reqwest::StatusCode) -> Self {
        let reason = match status.as_u16() {
            400 => "malformed upload request",
            401 => "authentication failed",
            403 => "uploads are not permitted for this key",
            406 => "raw byte body not accepted",
            413 => "attachment exceeds the server's size limit",
            500 => "server failed to store the upload",
            _ => "unclassified rejection",
        };

        ClientError::Upload {
            status: status.as_u16(),
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        ClientError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

pub type ClientResult<T> = StdResult<T, ClientError>;
