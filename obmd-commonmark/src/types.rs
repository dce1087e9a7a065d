//! Types for obmd-commonmark public API and internal use.
use serde::{Deserialize, Serialize};

use crate::content::Frontmatter;

/// Result of Markdown processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered HTML output.
  pub html: String,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,

  /// Key/value pairs from the leading `---` block, in document order.
  pub frontmatter: Frontmatter,
}
