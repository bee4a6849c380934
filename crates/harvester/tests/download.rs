//! PDF downloader idempotence and fault isolation against a stub server.

use std::time::Duration;

use harvester::{download::PdfDownloader, feed::FeedEntry, record::PaperRecord};
use tempfile::TempDir;
use wiremock::{
  matchers::{any, method, path},
  Mock, MockServer, ResponseTemplate,
};

type TestResult = anyhow::Result<()>;

fn record(id: &str, artifact_url: Option<String>) -> PaperRecord {
  let mut record = PaperRecord::from_entry(&FeedEntry {
    id: format!("http://arxiv.org/abs/{id}"),
    ..Default::default()
  });
  record.artifact_url = artifact_url;
  record
}

fn downloader(dir: &TempDir) -> PdfDownloader {
  PdfDownloader::new(dir.path()).with_courtesy_delay(Duration::ZERO)
}

#[tokio::test]
async fn downloads_artifacts_to_safe_names() -> TestResult {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/pdf/2401.00001v1.pdf"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 stub".to_vec()))
    .mount(&server)
    .await;

  let dir = tempfile::tempdir()?;
  let records = [record("2401.00001v1", Some(format!("{}/pdf/2401.00001v1.pdf", server.uri())))];

  let report = downloader(&dir).download_all(&records).await?;

  assert_eq!(report.downloaded.len(), 1);
  assert_eq!(report.skipped, 0);
  assert!(report.failed.is_empty());

  let stored = dir.path().join("2401.00001v1.pdf");
  assert_eq!(std::fs::read(&stored)?, b"%PDF-1.4 stub");
  // No staging leftovers.
  assert!(!dir.path().join("2401.00001v1.pdf.part").exists());
  Ok(())
}

#[tokio::test]
async fn existing_artifact_is_skipped_without_a_network_call() -> TestResult {
  let server = MockServer::start().await;
  // The mock verifies on drop that zero requests arrived.
  Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

  let dir = tempfile::tempdir()?;
  std::fs::write(dir.path().join("2401.00001v1.pdf"), b"already here")?;
  let records = [record("2401.00001v1", Some(format!("{}/pdf/2401.00001v1.pdf", server.uri())))];

  let report = downloader(&dir).download_all(&records).await?;

  assert!(report.downloaded.is_empty());
  assert_eq!(report.skipped, 1);
  assert!(report.failed.is_empty());
  assert_eq!(std::fs::read(dir.path().join("2401.00001v1.pdf"))?, b"already here");
  Ok(())
}

#[tokio::test]
async fn one_failure_does_not_abort_the_batch() -> TestResult {
  let server = MockServer::start().await;
  for good in ["2401.00001v1", "2401.00003v1"] {
    Mock::given(method("GET"))
      .and(path(format!("/pdf/{good}.pdf")))
      .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 stub".to_vec()))
      .mount(&server)
      .await;
  }
  Mock::given(method("GET"))
    .and(path("/pdf/2401.00002v1.pdf"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;

  let dir = tempfile::tempdir()?;
  let records: Vec<_> = ["2401.00001v1", "2401.00002v1", "2401.00003v1"]
    .iter()
    .map(|id| record(id, Some(format!("{}/pdf/{id}.pdf", server.uri()))))
    .collect();

  let report = downloader(&dir).download_all(&records).await?;

  assert_eq!(report.downloaded.len(), 2);
  assert_eq!(report.failed.len(), 1);
  assert_eq!(report.failed[0].0, "2401.00002v1");

  assert!(dir.path().join("2401.00001v1.pdf").exists());
  assert!(!dir.path().join("2401.00002v1.pdf").exists());
  assert!(dir.path().join("2401.00003v1.pdf").exists());
  Ok(())
}

#[tokio::test]
async fn records_without_artifact_urls_are_ignored() -> TestResult {
  let server = MockServer::start().await;
  Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

  let dir = tempfile::tempdir()?;
  let report = downloader(&dir).download_all(&[record("2401.00001v1", None)]).await?;

  assert!(report.downloaded.is_empty());
  assert_eq!(report.skipped, 0);
  assert!(report.failed.is_empty());
  Ok(())
}

#[tokio::test]
async fn failed_transfer_leaves_no_file_blocking_a_retry() -> TestResult {
  let server = MockServer::start().await;
  let dir = tempfile::tempdir()?;
  let records = [record("2401.00001v1", Some(format!("{}/pdf/2401.00001v1.pdf", server.uri())))];

  // First attempt: server errors out.
  let failing = Mock::given(method("GET"))
    .and(path("/pdf/2401.00001v1.pdf"))
    .respond_with(ResponseTemplate::new(503))
    .expect(1)
    .mount_as_scoped(&server)
    .await;
  let report = downloader(&dir).download_all(&records).await?;
  assert_eq!(report.failed.len(), 1);
  assert!(!dir.path().join("2401.00001v1.pdf").exists());
  drop(failing);

  // Retry succeeds because nothing counts as "already exists".
  Mock::given(method("GET"))
    .and(path("/pdf/2401.00001v1.pdf"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 stub".to_vec()))
    .mount(&server)
    .await;
  let report = downloader(&dir).download_all(&records).await?;
  assert_eq!(report.downloaded.len(), 1);
  assert!(dir.path().join("2401.00001v1.pdf").exists());
  Ok(())
}
