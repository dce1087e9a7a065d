//! Selecting the publishable part of a note.
//!
//! Notes usually carry a `---` frontmatter block and sometimes private
//! material around the part meant for publishing. [`ContentSelection`] cuts
//! the document down to the text between optional start and end markers.
use std::{path::Path, sync::LazyLock};

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils;

/// Frontmatter key/value pairs in document order.
pub type Frontmatter = IndexMap<String, String>;

static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
  utils::compile_or_never(
    "FRONTMATTER_RE",
    r"(?ms)\A\s*---[ \t]*\r?\n(.*?)^---[ \t]*\r?(?:\n|\z)",
  )
});

/// Split a leading frontmatter block off `content`.
///
/// Returns the parsed frontmatter (empty when there is none) and the
/// remaining document.
#[must_use]
pub fn split_frontmatter(content: &str) -> (Frontmatter, &str) {
  match FRONTMATTER_RE.captures(content) {
    Some(caps) => {
      let block = caps.get(1).map_or("", |m| m.as_str());
      let end = caps.get(0).map_or(0, |m| m.end());
      (parse_frontmatter(block), &content[end..])
    },
    None => (Frontmatter::new(), content),
  }
}

/// Remove a leading frontmatter block, if any.
#[must_use]
pub fn strip_frontmatter(content: &str) -> &str {
  split_frontmatter(content).1
}

/// Parse `key: value` lines. Lines without a colon, or with an empty key or
/// value, are skipped. Later duplicates overwrite earlier ones.
#[must_use]
pub fn parse_frontmatter(block: &str) -> Frontmatter {
  block
    .lines()
    .filter_map(|line| {
      let (key, value) = line.split_once(':')?;
      let (key, value) = (key.trim(), value.trim());
      (!key.is_empty() && !value.is_empty())
        .then(|| (key.to_string(), value.to_string()))
    })
    .collect()
}

/// Which part of a note gets published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSelection {
  /// Text marking the start of the published section. Empty disables it.
  pub start_marker:         String,
  /// Keep the start marker itself in the output.
  pub include_start_marker: bool,
  /// Text marking the end of the published section. Empty disables it.
  pub end_marker:           String,
  /// Keep the end marker itself in the output.
  pub include_end_marker:   bool,
}

impl ContentSelection {
  /// Strip frontmatter and cut `content` down to the marked section.
  ///
  /// The end marker is searched for after the start position. A marker that
  /// is not found leaves that side at the document edge. The result is
  /// trimmed.
  #[must_use]
  pub fn select<'a>(&self, content: &'a str) -> &'a str {
    let content = strip_frontmatter(content);

    let mut start = 0;
    if !self.start_marker.is_empty() {
      if let Some(index) = content.find(&self.start_marker) {
        start = if self.include_start_marker {
          index
        } else {
          index + self.start_marker.len()
        };
      } else {
        log::debug!("Start marker {:?} not found", self.start_marker);
      }
    }

    let mut end = content.len();
    if !self.end_marker.is_empty() {
      if let Some(offset) = content[start..].find(&self.end_marker) {
        let index = start + offset;
        end = if self.include_end_marker {
          index + self.end_marker.len()
        } else {
          index
        };
      } else {
        log::debug!("End marker {:?} not found", self.end_marker);
      }
    }

    content[start..end].trim()
  }
}

/// Derive a post title from a note's file name.
///
/// The extension is dropped, as is a single-character ordering prefix
/// followed by a space (`"1 Release notes.md"` → `"Release notes"`).
#[must_use]
pub fn post_title_from_path(path: &Path) -> Option<String> {
  let stem = path.file_stem()?.to_str()?;
  let mut chars = stem.chars();
  match (chars.next(), chars.next()) {
    (Some(_), Some(' ')) => Some(chars.as_str().to_string()),
    _ => Some(stem.to_string()),
  }
}
