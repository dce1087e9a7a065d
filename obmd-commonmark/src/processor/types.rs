//! Type definitions for the Markdown processor.
//!
//! Contains all the core types used by the processor, including:
//! - Configuration options (`MarkdownOptions`)
//! - The main processor struct (`MarkdownProcessor`)
//! - The preprocessing stage trait (`Preprocessor`)
//!
//! # Examples
//!
//! ```
//! use obmd_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   gfm: true,
//!   wiki_links: false,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```

use super::registry::PreprocessorRegistry;

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown (GFM) extensions in the renderer.
  pub gfm: bool,

  /// Convert `[[target|alias]]` wiki links to markdown links.
  pub wiki_links: bool,

  /// Replace YouTube images with embedded players.
  pub embed_youtube: bool,

  /// Move lists nested in `<li>` out next to their parent item.
  pub restructure_lists: bool,

  /// Wrap the rendered HTML in `<div class="...">` when set.
  pub wrap_class: Option<String>,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:               cfg!(feature = "gfm"),
      wiki_links:        true,
      embed_youtube:     true,
      restructure_lists: true,
      wrap_class:        None,
    }
  }
}

/// A line-oriented transform run over the document before rendering.
///
/// Implementations must be pure: all state lives inside one [`run`] call.
///
/// [`run`]: Preprocessor::run
pub trait Preprocessor: Send + Sync {
  /// Unique stage name. Registering a second stage under the same name
  /// replaces the first.
  fn name(&self) -> &'static str;

  /// Transform the document lines.
  fn run(&self, lines: Vec<String>) -> Vec<String>;
}

/// Main Markdown processor.
///
/// Holds the options and the ordered preprocessing stages; rendering does not
/// mutate it, so one processor can be shared between threads.
pub struct MarkdownProcessor {
  pub(crate) options:       MarkdownOptions,
  pub(crate) preprocessors: PreprocessorRegistry,
}

impl std::fmt::Debug for MarkdownProcessor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MarkdownProcessor")
      .field("options", &self.options)
      .field("preprocessors", &self.preprocessors.names())
      .finish()
  }
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Enable or disable wiki link conversion.
  #[must_use]
  pub const fn wiki_links(mut self, enabled: bool) -> Self {
    self.options.wiki_links = enabled;
    self
  }

  /// Enable or disable YouTube embeds.
  #[must_use]
  pub const fn embed_youtube(mut self, enabled: bool) -> Self {
    self.options.embed_youtube = enabled;
    self
  }

  /// Enable or disable nested list restructuring.
  #[must_use]
  pub const fn restructure_lists(mut self, enabled: bool) -> Self {
    self.options.restructure_lists = enabled;
    self
  }

  /// Set the wrapper class.
  #[must_use]
  pub fn wrap_class<S: Into<String>>(mut self, class: Option<S>) -> Self {
    self.options.wrap_class = class.map(Into::into);
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}
