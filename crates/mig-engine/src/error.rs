use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use mig_client::ClientError;
use thiserror::Error;

/// Errors that end a transfer run.
///
/// Per-item create/link failures only surface here as `Aborted`, and only
/// under the abort policy; attachment and note failures never do.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("could not build the transfer clients: {source} {location}")]
    Setup {
        location: ErrorLocation,
        #[source]
        source: ClientError,
    },

    #[error("could not fetch the source issue list: {source} {location}")]
    Fetch {
        location: ErrorLocation,
        #[source]
        source: ClientError,
    },

    #[error("transfer aborted at source issue #{issue_id}: {source} {location}")]
    Aborted {
        issue_id: u64,
        location: ErrorLocation,
        #[source]
        source: ClientError,
    },
}

impl EngineError {
    #[track_caller]
    pub fn setup(source: ClientError) -> Self {
        EngineError::Setup {
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn fetch(source: ClientError) -> Self {
        EngineError::Fetch {
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn aborted(issue_id: u64, source: ClientError) -> Self {
        EngineError::Aborted {
            issue_id,
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }
}

pub type EngineResult<T> = StdResult<T, EngineError>;
