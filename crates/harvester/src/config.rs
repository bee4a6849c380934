//! Run configuration loaded from a TOML file.
//!
//! Every field except `arxiv_api` is required; a missing field fails loading
//! with an error naming the field and the source file, before any network
//! activity.
//!
//! # Examples
//!
//! ```toml
//! out_jsonl = "data/papers.jsonl"
//! download_pdfs = true
//! pdf_dir = "data/pdfs"
//! batch_size = 100
//! total_to_fetch = 500
//! keywords = ["large language model", "retrieval augmented generation"]
//! ArXiv_categories = ["cs.CL", "cs.AI"]
//! ```

use super::*;

/// Default arXiv search endpoint, used when `arxiv_api` is absent.
pub const DEFAULT_ARXIV_API: &str = "https://export.arxiv.org/api/query";

/// Configuration for one harvesting run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  /// Destination JSONL append log; parent directories created if absent.
  pub out_jsonl:        PathBuf,
  /// Whether to download PDFs after the metadata pass.
  pub download_pdfs:    bool,
  /// Destination directory for PDFs; created if absent.
  pub pdf_dir:          PathBuf,
  /// Page size for each API request.
  pub batch_size:       usize,
  /// Upper bound on records retrieved in one run.
  pub total_to_fetch:   usize,
  /// Search terms, each matched as an exact phrase over title and abstract.
  pub keywords:         Vec<String>,
  /// arXiv subject categories restricting the match.
  #[serde(rename = "ArXiv_categories")]
  pub arxiv_categories: Vec<String>,
  /// Override for the search endpoint.
  #[serde(default = "default_arxiv_api")]
  pub arxiv_api:        String,
}

/// Serde default for [`Config::arxiv_api`].
fn default_arxiv_api() -> String { DEFAULT_ARXIV_API.to_string() }

impl Config {
  /// Loads and validates configuration from a TOML file.
  ///
  /// Fails with [`HarvesterError::Config`] naming the file when it cannot
  /// be read, a required field is missing, or `batch_size` is zero.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
      HarvesterError::Config(format!("cannot read config file {}: {e}", path.display()))
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| {
      HarvesterError::Config(format!("invalid config file {}: {e}", path.display()))
    })?;

    if config.batch_size == 0 {
      return Err(HarvesterError::Config(format!(
        "invalid config file {}: batch_size must be greater than zero",
        path.display()
      )));
    }

    Ok(config)
  }
}
