//! Error types for the harvester CLI.

use harvester::error::HarvesterError;
use thiserror::Error;

/// Error type alias used for the CLI.
pub type Result<T> = core::result::Result<T, HarvesterdError>;

/// Errors surfaced to the user by the CLI.
#[derive(Error, Debug)]
pub enum HarvesterdError {
  /// Any error bubbled up from the harvesting pipeline.
  #[error(transparent)]
  Harvester(#[from] HarvesterError),

  /// A file system operation failed outside the pipeline itself.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
