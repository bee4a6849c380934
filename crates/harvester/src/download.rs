//! Idempotent PDF retrieval for harvested records.
//!
//! The downloader walks a batch of records in order, fetching each record's
//! PDF into the cache directory. It is safe to re-run over the same records:
//! artifacts that already exist locally are skipped without a network call.
//! Bodies are streamed chunk-by-chunk through a `.part` staging file that is
//! renamed into place only once fully received, so a failed transfer never
//! leaves a partial file at the final path.
//!
//! One record's failure never aborts the batch: it is logged, recorded in
//! the [`DownloadReport`], and processing continues with the next record.

use tokio::io::AsyncWriteExt;

use super::*;
use crate::{client::USER_AGENT, record::PaperRecord};

/// Extension given to stored artifacts.
const PDF_EXTENSION: &str = "pdf";

/// Extension of the staging file used while a transfer is in flight.
const PARTIAL_EXTENSION: &str = "pdf.part";

/// Default per-request timeout for PDF transfers.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Outcome of one batch of download attempts.
#[derive(Debug, Default)]
pub struct DownloadReport {
  /// Paths of artifacts fetched by this run, in record order.
  pub downloaded: Vec<PathBuf>,
  /// Records skipped because the artifact already existed locally.
  pub skipped:    usize,
  /// `(record id, reason)` pairs for failed transfers.
  pub failed:     Vec<(String, String)>,
}

/// Downloads PDFs for harvested records into a cache directory.
#[derive(Debug, Clone)]
pub struct PdfDownloader {
  /// Internal web client reused across transfers.
  client:         reqwest::Client,
  /// Destination directory, created on first use.
  dir:            PathBuf,
  /// Timeout applied to each transfer.
  timeout:        Duration,
  /// Pause after each successful transfer.
  courtesy_delay: Duration,
}

impl PdfDownloader {
  /// Creates a downloader targeting `dir` with the default
  /// [`DOWNLOAD_TIMEOUT`] and the driver's courtesy delay.
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self {
      client:         reqwest::Client::new(),
      dir:            dir.into(),
      timeout:        DOWNLOAD_TIMEOUT,
      courtesy_delay: crate::fetch::COURTESY_DELAY,
    }
  }

  /// Overrides the per-transfer timeout.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Overrides the pause after each successful transfer (tests use zero).
  pub fn with_courtesy_delay(mut self, courtesy_delay: Duration) -> Self {
    self.courtesy_delay = courtesy_delay;
    self
  }

  /// Attempts to download the PDF for every record that has one.
  ///
  /// Records without an artifact URL are ignored, existing artifacts are
  /// skipped, and per-record failures are collected rather than returned.
  /// The only fatal error here is failing to create the cache directory
  /// itself.
  pub async fn download_all(&self, records: &[PaperRecord]) -> Result<DownloadReport> {
    tokio::fs::create_dir_all(&self.dir).await?;

    let mut report = DownloadReport::default();
    for record in records {
      let Some(url) = &record.artifact_url else { continue };

      let path = self.dir.join(format!("{}.{PDF_EXTENSION}", safe_filename(&record.id)));
      if path.exists() {
        debug!("already have {}", path.display());
        report.skipped += 1;
        continue;
      }

      match self.fetch_artifact(url, &path).await {
        Ok(()) => {
          info!("downloaded {}", path.display());
          report.downloaded.push(path);
          tokio::time::sleep(self.courtesy_delay).await;
        },
        Err(e) => {
          warn!("PDF download failed for {}: {e}", record.id);
          report.failed.push((record.id.clone(), e.to_string()));
        },
      }
    }

    Ok(report)
  }

  /// Streams one artifact to its destination via the staging file.
  async fn fetch_artifact(&self, url: &str, path: &Path) -> Result<()> {
    let response = self
      .client
      .get(url)
      .header(reqwest::header::USER_AGENT, USER_AGENT)
      .timeout(self.timeout)
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(HarvesterError::Api(format!(
        "artifact request returned {}",
        response.status()
      )));
    }

    let staging = path.with_extension(PARTIAL_EXTENSION);
    match stream_to_file(response, &staging).await {
      Ok(()) => {
        tokio::fs::rename(&staging, path).await?;
        Ok(())
      },
      Err(e) => {
        // A stale staging file must not block a future retry.
        let _ = tokio::fs::remove_file(&staging).await;
        Err(e)
      },
    }
  }
}

/// Writes the response body to `path` one chunk at a time, so arbitrarily
/// large artifacts never need full in-memory buffering.
async fn stream_to_file(mut response: reqwest::Response, path: &Path) -> Result<()> {
  let mut file = tokio::fs::File::create(path).await?;
  while let Some(chunk) = response.chunk().await? {
    file.write_all(&chunk).await?;
  }
  file.flush().await?;
  Ok(())
}

/// Computes a filesystem-safe name from a record id by replacing path
/// separators, e.g. old-style `math.AG/0601001` becomes `math.AG_0601001`.
pub fn safe_filename(id: &str) -> String { id.replace('/', "_") }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn safe_filename_replaces_path_separators() {
    assert_eq!(safe_filename("math.AG/0601001"), "math.AG_0601001");
    assert_eq!(safe_filename("2401.12345v2"), "2401.12345v2");
  }
}
