//! Client for the arXiv search API.
//!
//! This module issues one bounded search request at a time against the
//! paginated query endpoint and hands back the parsed Atom entries. The
//! [`PageFetch`] trait is the seam between the HTTP client and the
//! pagination driver, so tests can drive the loop with a stub fetcher.
//!
//! # Examples
//!
//! ```no_run
//! use harvester::{client::ArxivClient, config::DEFAULT_ARXIV_API};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new(DEFAULT_ARXIV_API);
//! let entries = client.search(r#"(all:"llm")"#, 0, 10).await?;
//! println!("got {} entries", entries.len());
//! # Ok(())
//! # }
//! ```

use super::*;

/// Descriptive User-Agent sent with every request; arXiv asks automated
/// clients to identify themselves with contact information.
pub const USER_AGENT: &str = "harvester/0.1 (mailto:harvester@autoparallel.xyz)";

/// Sort key applied to every search request.
pub const SORT_BY: &str = "submittedDate";

/// Sort direction applied to every search request.
pub const SORT_ORDER: &str = "descending";

/// Default per-request timeout for search calls.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A source of result pages for the pagination driver.
///
/// Implemented by [`ArxivClient`] for real runs and by stub fetchers in
/// tests. A failure here is fatal for the whole run: the driver does not
/// retry and does not commit partial progress.
#[async_trait]
pub trait PageFetch: Send + Sync {
  /// Fetches the window of results `[start, start + max_results)` for the
  /// given query expression.
  async fn fetch_page(
    &self,
    query: &str,
    start: usize,
    max_results: usize,
  ) -> Result<Vec<feed::FeedEntry>>;
}

/// HTTP client for the arXiv search endpoint.
#[derive(Debug, Clone)]
pub struct ArxivClient {
  /// Internal web client reused across requests.
  client:   reqwest::Client,
  /// Search endpoint, usually [`config::DEFAULT_ARXIV_API`].
  base_url: String,
  /// Timeout applied to each individual request.
  timeout:  Duration,
}

impl ArxivClient {
  /// Creates a client for the given search endpoint with the default
  /// [`SEARCH_TIMEOUT`].
  pub fn new(base_url: impl Into<String>) -> Self {
    Self { client: reqwest::Client::new(), base_url: base_url.into(), timeout: SEARCH_TIMEOUT }
  }

  /// Overrides the per-request timeout.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Issues exactly one search request and returns the parsed entries.
  ///
  /// Results are sorted by submission date, newest first. Fails on a
  /// transport error, a non-2xx status, or a malformed feed payload.
  pub async fn search(
    &self,
    query: &str,
    start: usize,
    max_results: usize,
  ) -> Result<Vec<feed::FeedEntry>> {
    debug!(start, max_results, "querying {}", self.base_url);

    let response = self
      .client
      .get(&self.base_url)
      .query(&[
        ("search_query", query),
        ("start", &start.to_string()),
        ("max_results", &max_results.to_string()),
        ("sortBy", SORT_BY),
        ("sortOrder", SORT_ORDER),
      ])
      .header(reqwest::header::USER_AGENT, USER_AGENT)
      .timeout(self.timeout)
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(HarvesterError::Api(format!(
        "search request returned {}",
        response.status()
      )));
    }

    let body = response.text().await?;
    trace!("arxiv response: {body}");

    Ok(feed::parse_feed(&body)?.entries)
  }
}

#[async_trait]
impl PageFetch for ArxivClient {
  async fn fetch_page(
    &self,
    query: &str,
    start: usize,
    max_results: usize,
  ) -> Result<Vec<feed::FeedEntry>> {
    self.search(query, start, max_results).await
  }
}
