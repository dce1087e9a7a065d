//! Rendering a single note for publishing.
use std::path::Path;

use obmd_commonmark::{
  Frontmatter,
  MarkdownProcessor,
  ProcessError,
  post_title_from_path,
  process_markdown_file,
};
use serde::Serialize;

use crate::config::Config;

/// A rendered note, as handed to a publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPost {
  /// Text of the first level-1 heading.
  pub title:       Option<String>,
  /// Title derived from the note's file name.
  pub post_title:  Option<String>,
  pub html:        String,
  pub frontmatter: Frontmatter,
}

impl RenderedPost {
  /// Serialize for output: the bare HTML, or the whole post as JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if JSON serialization fails.
  pub fn to_output(&self, format: &str) -> Result<String, serde_json::Error> {
    if format == "json" {
      serde_json::to_string_pretty(self)
    } else {
      Ok(self.html.clone())
    }
  }
}

/// Render the note at `input` with the given configuration.
///
/// # Errors
///
/// Returns an error if the note cannot be read.
pub fn render_note(
  config: &Config,
  input: &Path,
) -> Result<RenderedPost, ProcessError> {
  let processor = MarkdownProcessor::new(config.markdown_options());
  log::debug!("Rendering {} with {processor:?}", input.display());

  let result = process_markdown_file(&processor, input, &config.selection)?;
  Ok(RenderedPost {
    title:       result.title,
    post_title:  post_title_from_path(input),
    html:        result.html,
    frontmatter: result.frontmatter,
  })
}
