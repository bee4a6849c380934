//! Bulk metadata harvesting from the arXiv search API.
//!
//! `harvester` turns a topical query (keywords plus arXiv subject categories)
//! into a bounded sequence of paginated API calls, normalizes the returned
//! Atom entries into a stable [`record::PaperRecord`] schema, appends the
//! results to a JSONL log, and optionally downloads the matching PDFs into a
//! local cache.
//!
//! # Pipeline
//!
//! A single run is: build a query, drive the paginated fetch loop, commit the
//! accumulated records to the sink, then (optionally) download artifacts.
//!
//! ```no_run
//! use harvester::{
//!   client::ArxivClient,
//!   config::DEFAULT_ARXIV_API,
//!   fetch::{fetch_papers, FetchPlan},
//!   query::build_query,
//!   sink::JsonlSink,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let query = build_query(&["large language model".into()], &["cs.CL".into()]);
//! let client = ArxivClient::new(DEFAULT_ARXIV_API);
//! let sink = JsonlSink::new("papers.jsonl");
//! let plan = FetchPlan::new(query, 100, 250);
//!
//! let records = fetch_papers(&client, &plan, &sink).await?;
//! println!("saved {} records", records.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Design notes
//!
//! - Execution is strictly sequential: one page or one PDF transfer in flight
//!   at a time, with a fixed courtesy delay between requests.
//! - A page-fetch failure is fatal for the run and is never retried; records
//!   from completed pages are not committed in that case.
//! - Per-record PDF failures are reported and skipped so one bad artifact
//!   never aborts the batch.
//!
//! # Module Organization
//!
//! - [`query`]: arXiv boolean query construction
//! - [`client`]: search API client and the [`client::PageFetch`] seam
//! - [`feed`]: raw Atom feed shapes and parsing
//! - [`record`]: canonical paper records and normalization
//! - [`fetch`]: the pagination driver
//! - [`sink`]: append-only JSONL persistence
//! - [`download`]: idempotent PDF retrieval
//! - [`config`]: run configuration loaded from TOML

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod query;
pub mod record;
pub mod sink;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use harvester::prelude::*;
/// ```
pub mod prelude {
  pub use crate::{
    client::PageFetch,
    error::{HarvesterError, Result},
  };
}
