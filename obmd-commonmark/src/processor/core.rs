//! Core implementation of the Markdown processor.
//!
//! This module contains the main implementation of `MarkdownProcessor` and its
//! methods, focused on the core rendering pipeline and configuration
//! management.
use comrak::{Arena, options::Options, parse_document};
use log::trace;

use super::{
  registry::PreprocessorRegistry,
  types::{MarkdownOptions, MarkdownProcessor, Preprocessor},
};
use crate::{
  content,
  extensions::{
    CALLOUT_PRIORITY,
    CHECKBOX_PRIORITY,
    CalloutTransform,
    CheckboxTransform,
    WIKILINK_PRIORITY,
    WikiLinkTransform,
    postprocess,
  },
  types::MarkdownResult,
  utils,
};

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options and the built-in
  /// preprocessing stages registered.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    let mut preprocessors = PreprocessorRegistry::new();
    preprocessors.register(Box::new(CheckboxTransform), CHECKBOX_PRIORITY);
    preprocessors.register(Box::new(CalloutTransform), CALLOUT_PRIORITY);
    if options.wiki_links {
      preprocessors.register(Box::new(WikiLinkTransform), WIKILINK_PRIORITY);
    }

    Self {
      options,
      preprocessors,
    }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Access the registered preprocessing stages.
  #[must_use]
  pub const fn preprocessors(&self) -> &PreprocessorRegistry {
    &self.preprocessors
  }

  /// Register an additional preprocessing stage. Higher priorities run first;
  /// the built-in stages use [`CHECKBOX_PRIORITY`], [`CALLOUT_PRIORITY`] and
  /// [`WIKILINK_PRIORITY`].
  pub fn register_preprocessor(
    &mut self,
    stage: Box<dyn Preprocessor>,
    priority: i32,
  ) {
    self.preprocessors.register(stage, priority);
  }

  /// Builder-style [`register_preprocessor`](Self::register_preprocessor).
  #[must_use]
  pub fn with_preprocessor(
    mut self,
    stage: Box<dyn Preprocessor>,
    priority: i32,
  ) -> Self {
    self.register_preprocessor(stage, priority);
    self
  }

  /// Check if a specific feature is enabled.
  #[must_use]
  pub fn has_feature(&self, feature: ProcessorFeature) -> bool {
    match feature {
      ProcessorFeature::Gfm => self.options.gfm,
      ProcessorFeature::WikiLinks => {
        self.preprocessors.priority_of("wikilink").is_some()
      },
      ProcessorFeature::YoutubeEmbeds => self.options.embed_youtube,
      ProcessorFeature::ListRestructuring => self.options.restructure_lists,
      ProcessorFeature::HtmlWrapper => self.options.wrap_class.is_some(),
    }
  }

  /// Render Markdown to HTML, extracting the title and frontmatter.
  #[must_use]
  pub fn render(&self, markdown: &str) -> MarkdownResult {
    let (frontmatter, body) = content::split_frontmatter(markdown);
    MarkdownResult {
      frontmatter,
      ..self.render_body(body)
    }
  }

  /// Render a document that has no frontmatter block.
  ///
  /// Unlike [`render`](Self::render), a leading `---` line is a thematic
  /// break here. The returned frontmatter is always empty.
  #[must_use]
  pub fn render_body(&self, body: &str) -> MarkdownResult {
    let preprocessed = self.preprocess(body);
    let title = utils::extract_title_from_markdown(&preprocessed);
    let html = self.process_html_pipeline(&preprocessed);

    MarkdownResult {
      html,
      title,
      ..Default::default()
    }
  }

  /// Run the registered preprocessing stages over the document lines.
  #[must_use]
  pub fn preprocess(&self, content: &str) -> String {
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    trace!(
      "Preprocessing {} line(s) through {:?}",
      lines.len(),
      self.preprocessors.names()
    );
    self.preprocessors.run(lines).join("\n")
  }

  /// Process the HTML generation and post-processing pipeline.
  fn process_html_pipeline(&self, content: &str) -> String {
    let mut html = self.convert_to_html(content);

    if self.options.restructure_lists {
      html = postprocess::restructure_nested_lists(&html);
    }

    if self.options.embed_youtube {
      html = postprocess::embed_youtube_videos(&html);
    }

    if let Some(class_name) = &self.options.wrap_class {
      html = postprocess::wrap_html(&html, class_name);
    }

    html
  }

  /// Convert markdown to HTML using comrak and configured options.
  fn convert_to_html(&self, content: &str) -> String {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    let mut html_output = String::new();
    if let Err(e) = comrak::format_html(root, &options, &mut html_output) {
      log::error!("Failed to format HTML: {e}");
    }
    html_output
  }

  /// Build comrak options from `MarkdownOptions` and feature flags.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.autolink = true;
    }
    // Callout blocks reach the renderer as raw HTML.
    options.render.r#unsafe = true;
    options
  }
}

/// Features that can be queried on a processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorFeature {
  /// GitHub Flavored Markdown
  Gfm,
  /// `[[wiki link]]` conversion
  WikiLinks,
  /// YouTube image to player conversion
  YoutubeEmbeds,
  /// Nested list flattening in rendered HTML
  ListRestructuring,
  /// Wrapper `<div>` around the output
  HtmlWrapper,
}
