//! Construction of arXiv API search queries.
//!
//! The arXiv query grammar joins field-scoped clauses with boolean
//! operators. Keywords are searched as exact phrases over title and abstract
//! (`all:"..."`), and subject categories restrict the match (`cat:cs.CL`).

use super::*;

/// Builds an arXiv API search query from keywords and categories.
///
/// Keywords become a disjunction of quoted `all:` clauses; when categories
/// are supplied the keyword disjunction is conjoined with a disjunction of
/// `cat:` clauses.
///
/// An empty keyword list produces a structurally valid but semantically
/// empty query (`()`), which is left to the caller to reject or propagate.
///
/// # Examples
///
/// ```
/// use harvester::query::build_query;
///
/// let query = build_query(&["llm".into(), "rag".into()], &["cs.CL".into()]);
/// assert_eq!(query, r#"(all:"llm" OR all:"rag") AND (cat:cs.CL)"#);
/// ```
pub fn build_query(keywords: &[String], categories: &[String]) -> String {
  let kw_part =
    keywords.iter().map(|kw| format!("all:\"{kw}\"")).collect::<Vec<_>>().join(" OR ");

  if categories.is_empty() {
    format!("({kw_part})")
  } else {
    let cat_part = categories.iter().map(|c| format!("cat:{c}")).collect::<Vec<_>>().join(" OR ");
    format!("({kw_part}) AND ({cat_part})")
  }
}
