//! Raw Atom feed shapes returned by the arXiv search API.
//!
//! These types mirror the wire format before any normalization. Every field
//! is optional on the wire: an entry missing a title, authors, or links still
//! deserializes, so the "missing means empty, never an error" contract of the
//! normalizer holds from the parse layer up. Unknown (namespaced) elements
//! such as `opensearch:totalResults` or `arxiv:primary_category` are ignored.

use quick_xml::de::from_str;

use super::*;

/// One page of search results as returned by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feed {
  /// The entries contained in this page, in API return order.
  #[serde(rename = "entry", default)]
  pub entries: Vec<FeedEntry>,
}

/// One raw paper entry from the feed, prior to normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedEntry {
  /// Canonical URL for the item, e.g. `http://arxiv.org/abs/2401.12345v2`.
  #[serde(default)]
  pub id:         String,
  /// Paper title (may contain internal newlines).
  #[serde(default)]
  pub title:      String,
  /// Paper abstract (may contain internal newlines).
  #[serde(default)]
  pub summary:    String,
  /// Authors in the order returned by the source.
  #[serde(rename = "author", default)]
  pub authors:    Vec<FeedAuthor>,
  /// Submission timestamp in source textual form.
  #[serde(default)]
  pub published:  String,
  /// Last-update timestamp in source textual form.
  #[serde(default)]
  pub updated:    String,
  /// Tagged links attached to the entry (abstract page, PDF, DOI, ...).
  #[serde(rename = "link", default)]
  pub links:      Vec<FeedLink>,
  /// Subject classifications attached to the entry.
  #[serde(rename = "category", default)]
  pub categories: Vec<FeedCategory>,
}

/// One author element of a feed entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedAuthor {
  /// Author display name.
  #[serde(default)]
  pub name: String,
}

/// One tagged link element of a feed entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedLink {
  /// Link target.
  #[serde(rename = "@href", default)]
  pub href:       String,
  /// Link relation (`alternate`, `related`, ...).
  #[serde(rename = "@rel", default)]
  pub rel:        Option<String>,
  /// Declared media type, e.g. `application/pdf`.
  #[serde(rename = "@type", default)]
  pub media_type: Option<String>,
  /// Optional link title (arXiv marks its PDF link with `title="pdf"`).
  #[serde(rename = "@title", default)]
  pub title:      Option<String>,
}

/// One subject-classification element of a feed entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedCategory {
  /// Category term, e.g. `cs.CL`.
  #[serde(rename = "@term", default)]
  pub term: Option<String>,
}

/// Parses one page of Atom results.
///
/// Fails only on a malformed payload; missing optional elements are fine.
pub fn parse_feed(xml: &str) -> Result<Feed> { Ok(from_str(xml)?) }
