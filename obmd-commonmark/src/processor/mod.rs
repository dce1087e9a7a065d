//! Markdown processing pipeline.
//!
//! - [`core`]: main processor implementation and rendering pipeline
//! - [`registry`]: ordered preprocessing stages
//! - [`process`]: high-level processing functions with error recovery
//! - [`types`]: core type definitions and configuration structures
pub mod core;
pub mod process;
pub mod registry;
pub mod types;

pub use self::core::ProcessorFeature;

pub use process::{
  ProcessError,
  ProcessorPreset,
  create_processor,
  process_markdown_file,
  process_markdown_string,
  process_safe,
  process_with_recovery,
};
pub use registry::PreprocessorRegistry;
pub use types::{
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
  Preprocessor,
};

#[cfg(test)]
mod tests {
  use super::{MarkdownOptionsBuilder, MarkdownProcessor, ProcessorFeature};

  #[test]
  fn test_builder_disables_wiki_links() {
    let options = MarkdownOptionsBuilder::new()
      .gfm(true)
      .wiki_links(false)
      .wrap_class(Some("post"))
      .build();
    let processor = MarkdownProcessor::new(options);

    assert!(!processor.has_feature(ProcessorFeature::WikiLinks));
    assert!(processor.has_feature(ProcessorFeature::HtmlWrapper));
    assert_eq!(processor.preprocessors().names(), vec!["checkbox", "callout"]);

    let result = processor.render("see [[Other note]]");
    assert!(result.html.contains("[[Other note]]"));
    assert!(result.html.starts_with("<div class=\"post\">"));
  }

  #[test]
  fn test_preprocess_joins_lines() {
    let processor = MarkdownProcessor::new(MarkdownOptionsBuilder::new().build());
    assert_eq!(
      processor.preprocess("- [x] done\nplain"),
      "- ☑️ done\nplain"
    );
  }
}
