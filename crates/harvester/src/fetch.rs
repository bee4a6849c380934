//! The pagination driver: one logical query, a bounded sequence of API calls.
//!
//! Starting at offset 0, the driver repeatedly requests a page sized to
//! `min(batch_size, remaining)`, normalizes every entry, and advances the
//! offset by the number of entries actually returned. It stops once the
//! requested total is reached or the source returns an empty page, pausing
//! for a courtesy interval between page requests.
//!
//! A fetch failure inside the loop is deliberately not caught here: it
//! aborts the run without committing anything, and records accumulated from
//! already-completed pages are lost. There is no retry and no partial
//! commit.

use super::*;
use crate::{client::PageFetch, record::PaperRecord, sink::JsonlSink};

/// Default pause between consecutive API calls, to be polite to arXiv.
pub const COURTESY_DELAY: Duration = Duration::from_secs(1);

/// Parameters for one harvesting run.
#[derive(Debug, Clone)]
pub struct FetchPlan {
  /// Query expression from [`crate::query::build_query`].
  pub query:          String,
  /// Page size for each API call.
  pub batch_size:     usize,
  /// Upper bound on records retrieved in this run.
  pub total_to_fetch: usize,
  /// Pause between consecutive page requests.
  pub courtesy_delay: Duration,
}

impl FetchPlan {
  /// Creates a plan with the default [`COURTESY_DELAY`].
  pub fn new(query: impl Into<String>, batch_size: usize, total_to_fetch: usize) -> Self {
    Self { query: query.into(), batch_size, total_to_fetch, courtesy_delay: COURTESY_DELAY }
  }

  /// Overrides the pause between page requests (tests use zero).
  pub fn with_courtesy_delay(mut self, courtesy_delay: Duration) -> Self {
    self.courtesy_delay = courtesy_delay;
    self
  }
}

/// Drives the paginated fetch loop to completion.
///
/// Returns the accumulated records in API return order, concatenated across
/// pages, after committing them to `sink` as a single append. A page-fetch
/// error propagates immediately: nothing is committed in that case.
///
/// # Examples
///
/// ```no_run
/// use harvester::{
///   client::ArxivClient,
///   config::DEFAULT_ARXIV_API,
///   fetch::{fetch_papers, FetchPlan},
///   sink::JsonlSink,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ArxivClient::new(DEFAULT_ARXIV_API);
/// let sink = JsonlSink::new("papers.jsonl");
/// let plan = FetchPlan::new(r#"(all:"llm")"#, 100, 250);
/// let records = fetch_papers(&client, &plan, &sink).await?;
/// # Ok(())
/// # }
/// ```
pub async fn fetch_papers(
  fetcher: &dyn PageFetch,
  plan: &FetchPlan,
  sink: &JsonlSink,
) -> Result<Vec<PaperRecord>> {
  let mut fetched = 0;
  let mut records = Vec::new();

  while fetched < plan.total_to_fetch {
    let window = plan.batch_size.min(plan.total_to_fetch - fetched);
    let entries = fetcher.fetch_page(&plan.query, fetched, window).await?;

    if entries.is_empty() {
      info!("no more results");
      break;
    }

    records.extend(entries.iter().map(PaperRecord::from_entry));
    fetched += entries.len();
    info!(fetched, "fetched page of {} entries", entries.len());

    tokio::time::sleep(plan.courtesy_delay).await;
  }

  sink.append(&records)?;
  debug!("saved {} records to {}", records.len(), sink.path().display());

  Ok(records)
}
