//! Error types for the harvester library.
//!
//! This module provides a single error type covering every failure mode of a
//! harvesting run:
//! - Network and API errors while talking to arXiv
//! - Feed parsing errors
//! - Filesystem and serialization errors around the JSONL log and PDF cache
//! - Configuration errors raised before any network activity
//!
//! Normalization of individual feed entries never produces an error: missing
//! optional fields degrade to empty values in the output record instead.

use thiserror::Error;

/// Error type alias used for the [`harvester`](crate) crate.
pub type Result<T> = core::result::Result<T, HarvesterError>;

/// Errors that can occur while harvesting papers.
#[derive(Error, Debug)]
pub enum HarvesterError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The remote API returned an unsuccessful response.
  ///
  /// The string parameter carries the status or message from the API for
  /// debugging. For page fetches this is fatal for the run; for PDF
  /// downloads it is reported and the record is skipped.
  #[error("API error: {0}")]
  Api(String),

  /// The Atom feed payload could not be parsed.
  #[error(transparent)]
  Feed(#[from] quick_xml::DeError),

  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - Creating the output directories fails
  /// - Appending to the JSONL log fails
  /// - Writing a downloaded PDF fails
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// A record could not be serialized to JSON for the append log.
  #[error(transparent)]
  Serialize(#[from] serde_json::Error),

  /// The configuration file is missing, malformed, or incomplete.
  ///
  /// The message names the offending field and the source file. This error
  /// is raised before any network activity.
  #[error("{0}")]
  Config(String),
}
