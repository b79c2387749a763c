//! CLI command implementations.
//!
//! Commands return the lines to print so they can be tested without
//! capturing stdout.

pub mod catalog;
pub mod check;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use vitrine_storefront::data::{BundledSource, CatalogSource, DataError, DirectorySource};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A dataset could not be read or parsed.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// The datasets loaded but failed validation.
    #[error("Check failed with {0} problem(s)")]
    CheckFailed(usize),
}

/// Select the data source: a directory if given, the bundled datasets otherwise.
pub fn source(data_dir: Option<PathBuf>) -> Arc<dyn CatalogSource> {
    match data_dir {
        Some(dir) => {
            tracing::debug!(dir = %dir.display(), "Reading catalog from directory");
            Arc::new(DirectorySource::new(dir))
        }
        None => Arc::new(BundledSource),
    }
}

/// Print command output to stdout.
pub fn print(lines: &[String]) {
    #[allow(clippy::print_stdout)]
    for line in lines {
        println!("{line}");
    }
}
