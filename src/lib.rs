//! # ctgpdx - CTGP Deluxe download page tracker
//!
//! This crate reads the CTGP Deluxe download page and pulls out the latest
//! version, the download and unpacked sizes, and the release date. The page
//! is loosely formatted (stray spaces inside numbers, split keywords, mixed
//! casing), so extraction is an ordered set of tolerant pattern rules rather
//! than a grammar.
//!
//! ## Features
//!
//! - HTML to single-line text normalization
//! - Prioritized, independently testable extraction rules with fallbacks
//! - Partial results: any field found counts as success
//! - Health tracking that raises a notice after 24 hours without a
//!   successful update and clears it on recovery
//! - An update coordinator tying a page source, extraction and health
//!   tracking together
//!
//! ## Example
//!
//! ```rust,no_run
//! use ctgpdx::coordinator::{FileSource, UpdateCoordinator};
//! use ctgpdx::health::LogNotifier;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FileSource::new("download.html");
//!     let mut coordinator = UpdateCoordinator::new(source, LogNotifier);
//!
//!     let data = coordinator.refresh().await?;
//!     println!("Latest version: {:?}", data.version());
//!     Ok(())
//! }
//! ```

pub mod consts;
pub mod coordinator;
mod error;
pub mod extract;
pub mod health;

pub use error::{Error, Result};

/// Re-export of commonly used types
pub mod prelude {
    pub use crate::coordinator::{PageSource, UpdateCoordinator, UpdateError};
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::extract::{ExtractionResult, Field};
    pub use crate::health::{HealthTracker, IssueNotifier};
}
