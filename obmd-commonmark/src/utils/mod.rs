use comrak::{
  Arena,
  nodes::{AstNode, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};

/// Error type for utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
  #[error("Regex compilation failed: {0}")]
  RegexError(#[from] regex::Error),
}

/// Result type for utility operations.
pub type UtilResult<T> = Result<T, UtilError>;

/// Compile a regex, logging and falling back to [`never_matching_regex`] on
/// failure. Used to initialize the static patterns of the preprocessing
/// stages.
#[must_use]
pub fn compile_or_never(name: &str, pattern: &str) -> regex::Regex {
  try_compile(pattern).unwrap_or_else(|e| {
    log::error!(
      "Failed to compile {name} regex: {e}\n Falling back to never matching \
       regex."
    );
    never_matching_regex()
  })
}

/// Compile a regex pattern.
///
/// # Errors
///
/// Returns [`UtilError::RegexError`] if the pattern is invalid.
pub fn try_compile(pattern: &str) -> UtilResult<regex::Regex> {
  Ok(regex::Regex::new(pattern)?)
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
/// It will never match any input, which is safer than using a trivial regex
/// like `^$` which would match empty strings.
///
/// # Panics
///
/// Panics if the fallback regex pattern `r"^\b$"` fails to compile, which
/// should never happen.
#[must_use]
#[allow(
  clippy::unwrap_used,
  reason = "The fallback pattern is guaranteed to be valid"
)]
pub fn never_matching_regex() -> regex::Regex {
  regex::Regex::new(r"[^\s\S]")
    .unwrap_or_else(|_| regex::Regex::new(r"^\b$").unwrap())
}

/// Width of the leading whitespace of `line`, counted in characters.
///
/// Tabs count as a single column.
#[must_use]
pub fn leading_whitespace_width(line: &str) -> usize {
  let rest = line.trim_start();
  line[..line.len() - rest.len()].chars().count()
}

/// Tracks whether a line-oriented scan is currently inside a fenced code
/// block (```` ``` ```` or `~~~`).
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeFenceTracker {
  fence: Option<(char, usize)>,
}

impl CodeFenceTracker {
  /// Feed the next line. Returns `true` when the line is part of a fenced
  /// block, fence lines included.
  pub fn observe(&mut self, line: &str) -> bool {
    let trimmed = line.trim_start();
    let Some(fence_char) =
      trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))
    else {
      // Not a fence line; it belongs to whatever block is open
      return self.fence.is_some();
    };
    let fence_count = trimmed.chars().take_while(|&c| c == fence_char).count();
    if fence_count < 3 {
      return self.fence.is_some();
    }

    match self.fence {
      None => {
        self.fence = Some((fence_char, fence_count));
      },
      // A closing fence must use the opening character, at least as many times
      Some((open_char, open_count))
        if open_char == fence_char && fence_count >= open_count =>
      {
        self.fence = None;
      },
      Some(_) => {},
    }
    true
  }

  #[must_use]
  pub const fn in_code_block(&self) -> bool {
    self.fence.is_some()
  }
}

/// Extract the first H1 heading from markdown content as the document title.
///
/// # Returns
///
/// `None` if no H1 heading is found.
#[must_use]
pub fn extract_title_from_markdown(content: &str) -> Option<String> {
  let arena = Arena::new();
  let mut options = Options::default();
  options.extension.table = true;
  options.extension.strikethrough = true;
  options.render.r#unsafe = true;

  let root = parse_document(&arena, content, &options);

  for node in root.descendants() {
    if let NodeValue::Heading(NodeHeading { level: 1, .. }) =
      &node.data.borrow().value
    {
      let title = extract_inline_text(node);
      let title = title.trim();
      if !title.is_empty() {
        return Some(title.to_string());
      }
    }
  }
  None
}

/// Extract all inline text below a node, ignoring markup.
#[must_use]
pub fn extract_inline_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(t) => text.push_str(&t.literal),
      NodeValue::Link(..)
      | NodeValue::Emph
      | NodeValue::Strong
      | NodeValue::Strikethrough => {
        text.push_str(&extract_inline_text(child));
      },
      NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
      _ => {},
    }
  }
  text
}
