//! Obsidian callout blocks.
//!
//! A callout starts with a blockquote header carrying a bracketed kind and an
//! optional title:
//!
//! ```markdown
//! > [!Note] Remember
//! > Body text, possibly with
//! > - nested
//! >   - lists
//! ```
//!
//! [`CalloutTransform`] collects the header and its `>` continuation lines and
//! replaces them with a pre-rendered HTML block, which the markdown renderer
//! then passes through untouched.
use std::sync::LazyLock;

use regex::Regex;

use super::checkbox::substitute_task_marker;
use crate::{processor::Preprocessor, utils};

/// Priority of [`CalloutTransform`] in the preprocessing pipeline. Runs after
/// the checkbox stage.
pub const CALLOUT_PRIORITY: i32 = 175;

static CALLOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
  utils::compile_or_never("CALLOUT_RE", r"^>\s?\[!(\w+)\]\s*(.*?)$")
});

/// A callout collected during a scan. Only lives until it is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutBlock {
  /// Tag text between `[!` and `]`, case preserved.
  pub kind:       String,
  /// Header text after the tag, trimmed. May be empty.
  pub title:      String,
  /// Continuation lines with the leading `>` removed, in document order.
  pub body_lines: Vec<String>,
}

impl CalloutBlock {
  /// Parse a callout header line, yielding a block with an empty body.
  #[must_use]
  pub fn parse_header(line: &str) -> Option<Self> {
    let caps = CALLOUT_RE.captures(line)?;
    Some(Self {
      kind:       caps[1].to_string(),
      title:      caps[2].trim().to_string(),
      body_lines: Vec::new(),
    })
  }

  /// Title shown in the rendered block; falls back to the kind.
  #[must_use]
  pub fn display_title(&self) -> &str {
    if self.title.is_empty() {
      &self.kind
    } else {
      &self.title
    }
  }

  /// CSS class suffix, the lower-cased kind.
  #[must_use]
  pub fn css_kind(&self) -> String {
    self.kind.to_lowercase()
  }

  /// Render the block as HTML lines, followed by a blank separator line.
  #[must_use]
  pub fn render(&self) -> Vec<String> {
    log::debug!(
      "Rendering callout '{}' with {} body line(s)",
      self.kind,
      self.body_lines.len()
    );

    let content = render_body(&self.body_lines);

    let mut lines = Vec::with_capacity(content.len() + 6);
    lines.push(format!(
      "<div class=\"callout callout-{}\">",
      self.css_kind()
    ));
    lines.push(format!(
      "<p class=\"callout-title\">{}</p>",
      self.display_title()
    ));
    lines.push("<div class=\"callout-content\">".to_string());
    lines.extend(content);
    lines.push("</div>".to_string());
    lines.push("</div>".to_string());
    lines.push(String::new());
    lines
  }
}

/// Scanner state. Everything a scan accumulates lives in here and is dropped
/// with it.
#[derive(Debug)]
enum ScanState {
  Idle,
  InCallout(CalloutBlock),
}

impl ScanState {
  fn step(self, line: String, output: &mut Vec<String>) -> Self {
    if let Some(header) = CalloutBlock::parse_header(&line) {
      // A new header closes the open callout
      if let Self::InCallout(open) = self {
        output.extend(open.render());
      }
      return Self::InCallout(header);
    }

    match self {
      Self::InCallout(mut block) => {
        if let Some(rest) = line.strip_prefix('>') {
          block.body_lines.push(rest.to_string());
          Self::InCallout(block)
        } else {
          // The first line without `>` ends the callout and is kept as is
          output.extend(block.render());
          output.push(line);
          Self::Idle
        }
      },
      Self::Idle => {
        output.push(line);
        Self::Idle
      },
    }
  }

  fn finish(self, output: &mut Vec<String>) {
    if let Self::InCallout(block) = self {
      output.extend(block.render());
    }
  }
}

/// Preprocessing stage rendering Obsidian callouts to HTML blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalloutTransform;

impl Preprocessor for CalloutTransform {
  fn name(&self) -> &'static str {
    "callout"
  }

  fn run(&self, lines: Vec<String>) -> Vec<String> {
    let mut output = Vec::with_capacity(lines.len());
    let mut state = ScanState::Idle;
    for line in lines {
      state = state.step(line, &mut output);
    }
    state.finish(&mut output);
    output
  }
}

/// Flattens callout body lines into `<p>`, `<ul>` and `<li>` lines.
///
/// Nesting depth is `(indent - min_indent) / 2`, where `min_indent` is the
/// smallest indentation of any list item in the body. Indentation deltas that
/// are not a multiple of two truncate downwards.
#[derive(Debug, Default)]
struct BodyRenderer {
  min_indent:       usize,
  indent_stack:     Vec<usize>,
  paragraph_buffer: Vec<String>,
  output:           Vec<String>,
}

impl BodyRenderer {
  fn new(lines: &[String]) -> Self {
    let min_indent = lines
      .iter()
      .filter(|line| line.trim_start().starts_with("- "))
      .map(|line| utils::leading_whitespace_width(line))
      .min()
      .unwrap_or(0);

    Self {
      min_indent,
      ..Self::default()
    }
  }

  fn line(&mut self, line: &str) {
    let stripped = line.trim_start();
    if stripped.is_empty() {
      self.flush_paragraph();
      return;
    }

    if let Some(item) = stripped.strip_prefix("- ") {
      self.flush_paragraph();
      let level =
        (utils::leading_whitespace_width(line) - self.min_indent) / 2;
      self.list_item(level, item);
    } else {
      // Plain text closes every open list
      self.close_lists_above(None);
      self.paragraph_buffer.push(stripped.to_string());
    }
  }

  fn list_item(&mut self, level: usize, item: &str) {
    // Siblings close and reopen their group, so every item gets its own `<ul>`
    self.close_lists_above(Some(level));
    if self.indent_stack.last().is_none_or(|&top| top < level) {
      self.indent_stack.push(level);
      self.output.push("<ul>".to_string());
    }

    // Same substitution as the line stage: `[x]item` and `[x]  item` both
    // become `☑️ item`, with whitespace after the marker collapsed to one
    // space.
    let text =
      substitute_task_marker(item).unwrap_or_else(|| item.to_string());
    self.output.push(format!("<li>{text}</li>"));
  }

  /// Close open list levels whose indent is at least `level`, or every level
  /// when `level` is `None`.
  fn close_lists_above(&mut self, level: Option<usize>) {
    while let Some(&top) = self.indent_stack.last() {
      if level.is_some_and(|level| top < level) {
        break;
      }
      self.indent_stack.pop();
      self.output.push("</ul>".to_string());
    }
  }

  fn flush_paragraph(&mut self) {
    if self.paragraph_buffer.is_empty() {
      return;
    }
    let paragraph = self.paragraph_buffer.join("<br>");
    self.paragraph_buffer.clear();
    self.output.push(format!("<p>{paragraph}</p>"));
  }

  fn finish(mut self) -> Vec<String> {
    self.flush_paragraph();
    self.close_lists_above(None);
    self.output
  }
}

/// Render callout body lines to HTML content lines.
#[must_use]
pub fn render_body(lines: &[String]) -> Vec<String> {
  let mut renderer = BodyRenderer::new(lines);
  for line in lines {
    renderer.line(line);
  }
  renderer.finish()
}
