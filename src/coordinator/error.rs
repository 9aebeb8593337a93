//! Error types for the coordinator module

use std::time::Duration;

use crate::error::Error as CrateError;
use crate::extract::ExtractError;
use thiserror::Error;

/// Error returned by a [`PageSource`](super::PageSource)
#[derive(Debug, Error)]
pub enum FetchError {
    /// Reading a local document failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport could not deliver the page
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status, for host-provided network sources
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The fetch did not finish in time
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// Error type for an update cycle
///
/// Both variants count as a failed update for health tracking; they are kept
/// apart so "site unreachable" can be told from "site layout changed".
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The page could not be retrieved
    #[error("Error communicating with CTGP-DX server: {0}")]
    Fetch(#[from] FetchError),

    /// The page was retrieved but nothing could be extracted
    #[error("Error parsing website: {0}")]
    Parse(#[from] ExtractError),
}

impl UpdateError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, UpdateError::Fetch(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, UpdateError::Parse(_))
    }
}

impl From<UpdateError> for CrateError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::Fetch(FetchError::Io(e)) => CrateError::Io(e),
            UpdateError::Parse(e) => e.into(),
            _ => CrateError::Update(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_distinguish_origin() {
        let fetch = UpdateError::from(FetchError::Transport("Connection failed".to_string()));
        let parse = UpdateError::from(ExtractError::NoFields);

        assert_eq!(
            fetch.to_string(),
            "Error communicating with CTGP-DX server: Transport error: Connection failed"
        );
        assert_eq!(
            parse.to_string(),
            "Error parsing website: Could not find any relevant data on the CTGP-DX page."
        );
        assert!(fetch.is_fetch() && !fetch.is_parse());
        assert!(parse.is_parse() && !parse.is_fetch());
    }

    #[test]
    fn test_into_crate_error() {
        let err: CrateError = UpdateError::from(FetchError::Status(503)).into();
        assert!(matches!(err, CrateError::Update(msg) if msg.contains("503")));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CrateError = UpdateError::from(FetchError::Io(io)).into();
        assert!(matches!(err, CrateError::Io(_)));

        let err: CrateError = UpdateError::from(ExtractError::NoFields).into();
        assert_eq!(
            err.to_string(),
            "Update failed: Could not find any relevant data on the CTGP-DX page."
        );
    }
}
