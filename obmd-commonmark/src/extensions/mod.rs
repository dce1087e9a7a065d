//! Obsidian-flavored extensions.
//!
//! - [`checkbox`]: task checkbox glyphs
//! - [`callout`]: `> [!kind] title` callout blocks
//! - [`wikilink`]: `[[target|alias]]` links
//! - [`postprocess`]: HTML rewrites applied after rendering
pub mod callout;
pub mod checkbox;
pub mod postprocess;
pub mod wikilink;

pub use callout::{CALLOUT_PRIORITY, CalloutBlock, CalloutTransform};
pub use checkbox::{
  CHECKBOX_GLYPH,
  CHECKBOX_PRIORITY,
  CheckboxTransform,
  TaskState,
  substitute_task_marker,
  task_glyph,
};
pub use wikilink::{WIKILINK_PRIORITY, WikiLinkTransform};
