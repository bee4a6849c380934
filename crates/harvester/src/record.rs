//! Canonical paper records and feed-entry normalization.
//!
//! Normalization maps one raw [`feed::FeedEntry`] into the stable
//! [`PaperRecord`] schema that is written to the append log. It is total:
//! an entry missing any optional field yields empty strings or sequences,
//! never an error.

use super::*;

/// Media type marking a feed link as pointing at the PDF itself.
const PDF_MEDIA_TYPE: &str = "application/pdf";

/// The canonical unit of output, one per feed entry.
///
/// Records are immutable once created, appended to the JSONL log exactly
/// once, and may trigger at most one PDF download attempt. Timestamps are
/// kept in the source's textual form and are not reparsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
  /// Stable identifier extracted from the canonical URL, e.g.
  /// `2401.12345v2`.
  pub id:           String,
  /// Title with internal newlines collapsed and whitespace trimmed.
  pub title:        String,
  /// Abstract with internal newlines collapsed and whitespace trimmed.
  pub summary:      String,
  /// Author display names in source order; may be empty.
  pub authors:      Vec<String>,
  /// Submission timestamp as provided by the source.
  pub published:    String,
  /// Last-update timestamp as provided by the source.
  pub updated:      String,
  /// Canonical human-readable page URL for the item.
  pub source_url:   String,
  /// Resolvable PDF URL, if one could be determined.
  pub artifact_url: Option<String>,
  /// Subject categories; order not significant, duplicates permitted.
  pub categories:   Vec<String>,
  /// UTC wall-clock timestamp recording when normalization occurred.
  pub fetched_at:   String,
}

impl PaperRecord {
  /// Normalizes one raw feed entry into a record.
  ///
  /// This function never fails: absent optional fields map to empty
  /// strings or sequences.
  ///
  /// # Examples
  ///
  /// ```
  /// use harvester::{feed::FeedEntry, record::PaperRecord};
  ///
  /// let entry = FeedEntry { id: "http://arxiv.org/abs/2401.12345v2".into(), ..Default::default() };
  /// let record = PaperRecord::from_entry(&entry);
  /// assert_eq!(record.id, "2401.12345v2");
  /// ```
  pub fn from_entry(entry: &feed::FeedEntry) -> Self {
    Self {
      id:           normalize_arxiv_id(&entry.id),
      title:        squash_whitespace(&entry.title),
      summary:      squash_whitespace(&entry.summary),
      authors:      entry
        .authors
        .iter()
        .filter(|a| !a.name.is_empty())
        .map(|a| a.name.clone())
        .collect(),
      published:    entry.published.clone(),
      updated:      entry.updated.clone(),
      source_url:   entry.id.clone(),
      artifact_url: resolve_artifact_url(entry),
      categories:   entry.categories.iter().filter_map(|c| c.term.clone()).collect(),
      fetched_at:   Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
    }
  }
}

/// Extracts the arXiv identifier from a canonical URL.
///
/// Takes the trailing path segment after the last `/abs/`, e.g.
/// `http://arxiv.org/abs/2401.12345v2` becomes `2401.12345v2`. Input with no
/// such segment is returned unchanged.
pub fn normalize_arxiv_id(entry_id: &str) -> String {
  lazy_static! {
    /// Matches the trailing path segment of an `/abs/` URL.
    static ref ABS_ID: Regex = Regex::new(r"/abs/([^/]+)$").unwrap();
  }

  ABS_ID
    .captures(entry_id)
    .and_then(|cap| cap.get(1))
    .map(|m| m.as_str().to_string())
    .unwrap_or_else(|| entry_id.to_string())
}

/// Resolves the PDF URL for an entry, if any.
///
/// Resolution order:
/// 1. A tagged link with media type `application/pdf` and a syntactically
///    valid href.
/// 2. The canonical `/abs/` URL rewritten to `/pdf/` with a `.pdf` suffix.
///    The scheme is forced to `http` to match arXiv's fallback path
///    convention.
/// 3. `None`.
fn resolve_artifact_url(entry: &feed::FeedEntry) -> Option<String> {
  for link in &entry.links {
    if link.media_type.as_deref() == Some(PDF_MEDIA_TYPE) && url::Url::parse(&link.href).is_ok() {
      return Some(link.href.clone());
    }
  }

  if entry.id.contains("/abs/") {
    let abs_url = entry.id.replacen("https://", "http://", 1);
    return Some(format!("{}.pdf", abs_url.replace("/abs/", "/pdf/")));
  }

  None
}

/// Collapses internal newlines to spaces and trims surrounding whitespace.
fn squash_whitespace(text: &str) -> String { text.replace('\n', " ").trim().to_string() }

#[cfg(test)]
mod tests {
  use super::*;
  use crate::feed::{FeedCategory, FeedEntry, FeedLink};

  fn entry_with_id(id: &str) -> FeedEntry { FeedEntry { id: id.into(), ..Default::default() } }

  #[test]
  fn id_extracted_from_abs_url() {
    assert_eq!(normalize_arxiv_id("http://arxiv.org/abs/2401.12345v2"), "2401.12345v2");
  }

  #[test]
  fn id_without_abs_segment_unchanged() {
    assert_eq!(normalize_arxiv_id("oai:arXiv.org:2401.12345"), "oai:arXiv.org:2401.12345");
  }

  #[test]
  fn old_style_id_with_slash_is_kept_raw() {
    // The trailing segment must be slash-free, so old-style ids fall back
    // to the unmodified input.
    assert_eq!(
      normalize_arxiv_id("http://arxiv.org/abs/math.AG/0601001"),
      "http://arxiv.org/abs/math.AG/0601001"
    );
  }

  #[test]
  fn pdf_link_preferred_over_fallback() {
    let mut entry = entry_with_id("https://arxiv.org/abs/2401.12345");
    entry.links.push(FeedLink {
      href: "http://arxiv.org/pdf/2401.12345v2".into(),
      media_type: Some("application/pdf".into()),
      ..Default::default()
    });
    assert_eq!(
      resolve_artifact_url(&entry).as_deref(),
      Some("http://arxiv.org/pdf/2401.12345v2")
    );
  }

  #[test]
  fn fallback_rewrites_abs_to_pdf_and_forces_http() {
    let entry = entry_with_id("https://arxiv.org/abs/2401.12345");
    assert_eq!(
      resolve_artifact_url(&entry).as_deref(),
      Some("http://arxiv.org/pdf/2401.12345.pdf")
    );
  }

  #[test]
  fn invalid_pdf_link_falls_through_to_rewrite() {
    let mut entry = entry_with_id("http://arxiv.org/abs/2401.12345");
    entry.links.push(FeedLink {
      href: "not a url".into(),
      media_type: Some("application/pdf".into()),
      ..Default::default()
    });
    assert_eq!(
      resolve_artifact_url(&entry).as_deref(),
      Some("http://arxiv.org/pdf/2401.12345.pdf")
    );
  }

  #[test]
  fn no_links_and_no_abs_url_yields_none() {
    assert_eq!(resolve_artifact_url(&entry_with_id("urn:something:else")), None);
  }

  #[test]
  fn normalization_is_total_on_sparse_entries() {
    let record = PaperRecord::from_entry(&entry_with_id("http://arxiv.org/abs/2401.00001v1"));
    assert_eq!(record.id, "2401.00001v1");
    assert!(record.title.is_empty());
    assert!(record.summary.is_empty());
    assert!(record.authors.is_empty());
    assert!(record.categories.is_empty());
    assert!(record.published.is_empty());
    assert!(!record.fetched_at.is_empty());
  }

  #[test]
  fn text_fields_squashed() {
    let entry = FeedEntry {
      id: "http://arxiv.org/abs/2401.1v1".into(),
      title: "  A Study of\n Language Models ".into(),
      summary: "line one\nline two".into(),
      ..Default::default()
    };
    let record = PaperRecord::from_entry(&entry);
    assert_eq!(record.title, "A Study of  Language Models");
    assert_eq!(record.summary, "line one line two");
  }

  #[test]
  fn categories_collected_in_order_with_duplicates() {
    let mut entry = entry_with_id("http://arxiv.org/abs/2401.1v1");
    entry.categories = vec![
      FeedCategory { term: Some("cs.CL".into()) },
      FeedCategory { term: None },
      FeedCategory { term: Some("cs.CL".into()) },
    ];
    let record = PaperRecord::from_entry(&entry);
    assert_eq!(record.categories, ["cs.CL", "cs.CL"]);
  }
}
