//! # obmd-commonmark
//!
//! Renders Obsidian-flavored Markdown notes to HTML ready for publishing.
//! Notes pass through line-oriented preprocessing stages before `comrak`
//! renders them:
//!
//! - **Task checkboxes** (`- [ ] item`, `- [x] item`) become a fixed glyph
//! - **Callouts** (`> [!Note] Title`) become styled `<div>` blocks, with
//!   nested lists inside the callout body flattened from their indentation
//! - **Wiki links** (`[[target|alias]]`) become regular Markdown links
//!
//! The rendered HTML can then have nested lists restructured, YouTube images
//! turned into embedded players, and the whole document wrapped in a
//! container `<div>`.
//!
//! ## Quick Start
//!
//! ```rust
//! use obmd_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render("> [!Note] Hi\n> body text");
//!
//! assert!(result.html.contains("callout-note"));
//! ```
//!
//! ## Custom stages
//!
//! Additional stages implement [`Preprocessor`] and are registered at a
//! priority. Higher priorities run first.
//!
//! ```rust
//! use obmd_commonmark::{MarkdownOptions, MarkdownProcessor, Preprocessor};
//!
//! struct Shout;
//!
//! impl Preprocessor for Shout {
//!   fn name(&self) -> &'static str {
//!     "shout"
//!   }
//!
//!   fn run(&self, lines: Vec<String>) -> Vec<String> {
//!     lines.into_iter().map(|l| l.to_uppercase()).collect()
//!   }
//! }
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default())
//!   .with_preprocessor(Box::new(Shout), 10);
//! assert!(processor.render("hello").html.contains("HELLO"));
//! ```

pub mod content;
pub mod extensions;
pub mod processor;
mod types;
pub mod utils;

pub use crate::{
  content::{ContentSelection, Frontmatter, post_title_from_path},
  processor::{
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    Preprocessor,
    PreprocessorRegistry,
    ProcessError,
    ProcessorFeature,
    ProcessorPreset,
    create_processor,
    process_markdown_file,
    process_markdown_string,
    process_safe,
    process_with_recovery,
  },
  types::MarkdownResult,
};
