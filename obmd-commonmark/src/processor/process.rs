//! Main processing functions for Markdown content.
use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use log::error;

use super::types::{MarkdownOptions, MarkdownProcessor};
use crate::{content::ContentSelection, types::MarkdownResult};

/// Errors raised while processing markdown from disk.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
  #[error("Failed to read file {}: {source}", .path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Process markdown content with error recovery.
///
/// Renders through [`MarkdownProcessor::render`], so a leading frontmatter
/// block is split off and reported. A panic anywhere in the pipeline yields an
/// error `<div>` instead of unwinding into the caller.
#[must_use]
pub fn process_with_recovery(
  processor: &MarkdownProcessor,
  content: &str,
) -> MarkdownResult {
  render_or_error_block(|| processor.render(content))
}

fn render_or_error_block<F>(render_fn: F) -> MarkdownResult
where
  F: FnOnce() -> MarkdownResult,
{
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(render_fn)) {
    Ok(result) => result,
    Err(panic_err) => {
      error!("Panic during markdown processing: {panic_err:?}");
      MarkdownResult {
        html: "<div class=\"error\">Critical error processing markdown \
               content</div>"
          .to_string(),
        ..Default::default()
      }
    },
  }
}

/// Run `processor_fn` over `content`, returning `fallback` (or `content` when
/// the fallback is empty) if it panics.
///
/// Used by the DOM rewrites: a document html5ever chokes on is published
/// as rendered rather than lost.
pub fn process_safe<F>(content: &str, processor_fn: F, fallback: &str) -> String
where
  F: FnOnce(&str) -> String,
{
  // Empty input has nothing to rewrite
  if content.is_empty() {
    return String::new();
  }

  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor_fn(content)
  }));

  match result {
    Ok(processed) => processed,
    Err(e) => {
      // Panic payloads are `String` for formatted panics, `&str` for literals
      let message = e
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| e.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
      error!("Error post-processing HTML: {message}");

      if fallback.is_empty() {
        content.to_string()
      } else {
        fallback.to_string()
      }
    },
  }
}

/// Create a processor with sensible defaults for library usage.
#[must_use]
pub fn create_processor(preset: ProcessorPreset) -> MarkdownProcessor {
  let options = match preset {
    ProcessorPreset::Basic => {
      MarkdownOptions {
        gfm:               true,
        wiki_links:        false,
        embed_youtube:     false,
        restructure_lists: false,
        wrap_class:        None,
      }
    },
    ProcessorPreset::Obsidian => {
      MarkdownOptions {
        gfm:               true,
        wiki_links:        true,
        embed_youtube:     true,
        restructure_lists: true,
        wrap_class:        None,
      }
    },
    ProcessorPreset::Blog => {
      MarkdownOptions {
        gfm:               true,
        wiki_links:        true,
        embed_youtube:     true,
        restructure_lists: true,
        wrap_class:        Some("obsidian-content".to_string()),
      }
    },
  };

  MarkdownProcessor::new(options)
}

/// Preset configurations for common use cases. Callouts and checkboxes are
/// handled by every preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorPreset {
  /// GFM rendering without wiki links or HTML rewrites
  Basic,
  /// Every Obsidian extension, unwrapped output
  Obsidian,
  /// Every Obsidian extension, wrapped in `<div class="obsidian-content">`
  Blog,
}

/// Process markdown content from a string with error recovery.
#[must_use]
pub fn process_markdown_string(
  content: &str,
  preset: ProcessorPreset,
) -> MarkdownResult {
  let processor = create_processor(preset);
  process_with_recovery(&processor, content)
}

/// Process a markdown note from disk, publishing only the selected section.
///
/// Frontmatter is still reported in the result even though it is cut from the
/// rendered body.
///
/// # Errors
///
/// Returns [`ProcessError::Read`] if the file cannot be read.
pub fn process_markdown_file(
  processor: &MarkdownProcessor,
  file_path: &Path,
  selection: &ContentSelection,
) -> Result<MarkdownResult, ProcessError> {
  let content =
    fs::read_to_string(file_path).map_err(|source| ProcessError::Read {
      path: file_path.to_path_buf(),
      source,
    })?;

  let (frontmatter, _) = crate::content::split_frontmatter(&content);
  // `select` cuts the frontmatter itself; a `---` rule opening the selected
  // body is a rule, not a second block.
  let body = selection.select(&content);
  let mut result = render_or_error_block(|| processor.render_body(body));
  result.frontmatter = frontmatter;
  Ok(result)
}
