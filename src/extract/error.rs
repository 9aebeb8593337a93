//! Error types for the extract module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for field extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// None of the rules matched anything in the page text
    #[error("Could not find any relevant data on the CTGP-DX page.")]
    NoFields,
}

impl From<ExtractError> for CrateError {
    fn from(err: ExtractError) -> Self {
        CrateError::Update(err.to_string())
    }
}
