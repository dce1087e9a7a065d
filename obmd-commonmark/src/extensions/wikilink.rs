//! Obsidian wiki links.
//!
//! `[[target]]` and `[[target|alias]]` become ordinary markdown links, so
//! `![[image.png]]` embeds end up as markdown images. Fenced code is left
//! alone.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{processor::Preprocessor, utils};

/// Priority of [`WikiLinkTransform`] in the preprocessing pipeline.
pub const WIKILINK_PRIORITY: i32 = 150;

static WIKILINK_RE: LazyLock<Regex> =
  LazyLock::new(|| utils::compile_or_never("WIKILINK_RE", r"\[\[(.*?)\]\]"));

/// Rewrite every wiki link in a single line.
#[must_use]
pub fn rewrite_wiki_links(line: &str) -> String {
  WIKILINK_RE
    .replace_all(line, |caps: &Captures| {
      let inner = &caps[1];
      let (target, text) = inner.split_once('|').unwrap_or((inner, inner));
      format!("[{text}]({target})")
    })
    .into_owned()
}

/// Preprocessing stage converting wiki links to markdown links.
#[derive(Debug, Default, Clone, Copy)]
pub struct WikiLinkTransform;

impl Preprocessor for WikiLinkTransform {
  fn name(&self) -> &'static str {
    "wikilink"
  }

  fn run(&self, lines: Vec<String>) -> Vec<String> {
    let mut fences = utils::CodeFenceTracker::default();
    lines
      .into_iter()
      .map(|line| {
        if fences.observe(&line) || !line.contains("[[") {
          line
        } else {
          rewrite_wiki_links(&line)
        }
      })
      .collect()
  }
}
