//! Task-list checkbox rewriting.
//!
//! Obsidian task items (`- [ ] todo`, `- [x] done`) are rendered with a fixed
//! glyph instead of a form control. Both the standalone line stage and the
//! callout body renderer go through [`substitute_task_marker`].
use std::sync::LazyLock;

use regex::Regex;

use crate::{processor::Preprocessor, utils};

/// Glyph emitted in place of a task checkbox.
///
/// Checked and unchecked boxes currently share this glyph, see
/// [`task_glyph`].
pub const CHECKBOX_GLYPH: &str = "☑️";

/// Priority of [`CheckboxTransform`] in the preprocessing pipeline.
pub const CHECKBOX_PRIORITY: i32 = 200;

static CHECKBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
  utils::compile_or_never("CHECKBOX_RE", r"^\s*-\s*(\[[ x]\].*)$")
});

/// State of a task checkbox as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
  Unchecked,
  Checked,
}

impl TaskState {
  /// Parse a leading `[ ]` or `[x]` marker, returning the state and the text
  /// after the three marker characters.
  #[must_use]
  pub fn split_marker(text: &str) -> Option<(Self, &str)> {
    if let Some(rest) = text.strip_prefix("[ ]") {
      Some((Self::Unchecked, rest))
    } else {
      text.strip_prefix("[x]").map(|rest| (Self::Checked, rest))
    }
  }
}

/// Glyph for a task in the given state.
///
/// The checked/unchecked distinction is deliberately discarded: both map to
/// [`CHECKBOX_GLYPH`].
#[must_use]
pub const fn task_glyph(_state: TaskState) -> &'static str {
  CHECKBOX_GLYPH
}

/// Replace a leading task marker in `text` with the task glyph.
///
/// Whitespace between the marker and the item text collapses to a single
/// space. Returns `None` if `text` does not start with `[ ]` or `[x]`.
#[must_use]
pub fn substitute_task_marker(text: &str) -> Option<String> {
  let (state, rest) = TaskState::split_marker(text)?;
  Some(format!("{} {}", task_glyph(state), rest.trim_start()))
}

/// Rewrite a single line if it is a checkbox list item.
///
/// Leading indentation before the dash is dropped, so nested task items are
/// pulled up to the top level.
#[must_use]
pub fn rewrite_checkbox_line(line: &str) -> Option<String> {
  let caps = CHECKBOX_RE.captures(line)?;
  substitute_task_marker(&caps[1]).map(|item| format!("- {item}"))
}

/// Line-level, stateless preprocessing stage replacing task checkboxes with
/// [`CHECKBOX_GLYPH`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckboxTransform;

impl Preprocessor for CheckboxTransform {
  fn name(&self) -> &'static str {
    "checkbox"
  }

  fn run(&self, lines: Vec<String>) -> Vec<String> {
    lines
      .into_iter()
      .map(|line| {
        match rewrite_checkbox_line(&line) {
          Some(rewritten) => {
            log::trace!("Rewrote checkbox line: {line:?}");
            rewritten
          },
          None => line,
        }
      })
      .collect()
  }
}
